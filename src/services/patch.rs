//! Patch-operation lists for partial updates
//!
//! A small subset of JSON Patch: `add`, `remove`, `replace` and `test`, each
//! addressed by a JSON pointer. Operations are applied in order to a JSON
//! document; the first failing operation aborts the whole list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EasyFinanceError, EasyFinanceResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
    Test { path: String, value: Value },
}

impl PatchOperation {
    pub fn replace(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Replace {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Add { path, .. }
            | Self::Remove { path }
            | Self::Replace { path, .. }
            | Self::Test { path, .. } => path,
        }
    }
}

/// Apply all operations to `doc`, leaving it untouched on failure
pub fn apply_patch(doc: &mut Value, operations: &[PatchOperation]) -> EasyFinanceResult<()> {
    let mut working = doc.clone();
    for op in operations {
        apply_one(&mut working, op)?;
    }
    *doc = working;
    Ok(())
}

fn apply_one(doc: &mut Value, op: &PatchOperation) -> EasyFinanceResult<()> {
    match op {
        PatchOperation::Test { path, value } => match doc.pointer(path) {
            Some(current) if current == value => Ok(()),
            _ => Err(EasyFinanceError::Patch(format!("test failed at '{}'", path))),
        },
        PatchOperation::Replace { path, value } => {
            let target = doc
                .pointer_mut(path)
                .ok_or_else(|| EasyFinanceError::Patch(format!("no value at '{}'", path)))?;
            *target = value.clone();
            Ok(())
        }
        PatchOperation::Add { path, value } => {
            let (parent, token) = split_pointer(path)?;
            match parent_mut(doc, parent, path)? {
                Value::Object(map) => {
                    map.insert(token, value.clone());
                    Ok(())
                }
                Value::Array(items) => {
                    let index = if token == "-" {
                        items.len()
                    } else {
                        parse_index(&token, items.len() + 1, path)?
                    };
                    items.insert(index, value.clone());
                    Ok(())
                }
                _ => Err(EasyFinanceError::Patch(format!("cannot add at '{}'", path))),
            }
        }
        PatchOperation::Remove { path } => {
            let (parent, token) = split_pointer(path)?;
            match parent_mut(doc, parent, path)? {
                Value::Object(map) => map
                    .remove(&token)
                    .map(drop)
                    .ok_or_else(|| EasyFinanceError::Patch(format!("no value at '{}'", path))),
                Value::Array(items) => {
                    let index = parse_index(&token, items.len(), path)?;
                    items.remove(index);
                    Ok(())
                }
                _ => Err(EasyFinanceError::Patch(format!("cannot remove at '{}'", path))),
            }
        }
    }
}

/// Split "/a/b/c" into ("/a/b", "c"), unescaping the last token
fn split_pointer(path: &str) -> EasyFinanceResult<(&str, String)> {
    let index = path
        .rfind('/')
        .ok_or_else(|| EasyFinanceError::Patch(format!("invalid pointer '{}'", path)))?;
    let token = path[index + 1..].replace("~1", "/").replace("~0", "~");
    Ok((&path[..index], token))
}

fn parent_mut<'a>(doc: &'a mut Value, parent: &str, path: &str) -> EasyFinanceResult<&'a mut Value> {
    doc.pointer_mut(parent)
        .ok_or_else(|| EasyFinanceError::Patch(format!("no parent for '{}'", path)))
}

/// Index must be strictly below `bound`
fn parse_index(token: &str, bound: usize, path: &str) -> EasyFinanceResult<usize> {
    token
        .parse::<usize>()
        .ok()
        .filter(|i| *i < bound)
        .ok_or_else(|| EasyFinanceError::Patch(format!("index out of range at '{}'", path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_replace_and_test() {
        let mut doc = json!({"name": "House", "type": "Personal"});
        let ops = vec![
            PatchOperation::Test {
                path: "/name".into(),
                value: json!("House"),
            },
            PatchOperation::replace("/name", "Home"),
        ];
        apply_patch(&mut doc, &ops).unwrap();
        assert_eq!(doc["name"], "Home");
    }

    #[test]
    fn test_add_and_remove_in_arrays() {
        let mut doc = json!({"tags": ["a", "c"]});
        apply_patch(
            &mut doc,
            &[
                PatchOperation::Add {
                    path: "/tags/1".into(),
                    value: json!("b"),
                },
                PatchOperation::Add {
                    path: "/tags/-".into(),
                    value: json!("d"),
                },
            ],
        )
        .unwrap();
        assert_eq!(doc["tags"], json!(["a", "b", "c", "d"]));

        apply_patch(&mut doc, &[PatchOperation::Remove { path: "/tags/0".into() }]).unwrap();
        assert_eq!(doc["tags"], json!(["b", "c", "d"]));
    }

    #[test]
    fn test_failure_leaves_document_untouched() {
        let mut doc = json!({"name": "House"});
        let ops = vec![
            PatchOperation::replace("/name", "Home"),
            PatchOperation::Remove {
                path: "/missing".into(),
            },
        ];
        assert!(apply_patch(&mut doc, &ops).is_err());
        assert_eq!(doc["name"], "House");
    }

    #[test]
    fn test_failed_test_operation() {
        let mut doc = json!({"name": "House"});
        let ops = vec![PatchOperation::Test {
            path: "/name".into(),
            value: json!("Other"),
        }];
        let err = apply_patch(&mut doc, &ops).unwrap_err();
        assert!(matches!(err, EasyFinanceError::Patch(_)));
    }

    #[test]
    fn test_deserialize_operation_list() {
        let ops: Vec<PatchOperation> = serde_json::from_str(
            r#"[{"op": "replace", "path": "/name", "value": "Home"},
                {"op": "remove", "path": "/old"}]"#,
        )
        .unwrap();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[1].path(), "/old");
    }
}
