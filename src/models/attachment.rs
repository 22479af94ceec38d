//! Attachments linked to expenses and expense items

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AttachmentId;
use super::validation::require_text;
use crate::error::ValidationResult;

/// What kind of document an attachment is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentType {
    Invoice,
    Receipt,
    #[default]
    Other,
}

impl fmt::Display for AttachmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invoice => write!(f, "Invoice"),
            Self::Receipt => write!(f, "Receipt"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A named document attached to an expense
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Attachment {
    id: AttachmentId,
    name: String,
    #[serde(default)]
    attachment_type: AttachmentType,
}

impl Attachment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> AttachmentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attachment_type(&self) -> AttachmentType {
        self.attachment_type
    }

    pub fn set_name(&mut self, name: Option<&str>) -> ValidationResult<&mut Self> {
        self.name = require_text(name, "Name")?;
        Ok(self)
    }

    pub fn set_type(&mut self, attachment_type: AttachmentType) -> &mut Self {
        self.attachment_type = attachment_type;
        self
    }

    /// Re-run the setter checks, e.g. after deserialization
    pub fn validate(&self) -> ValidationResult<()> {
        require_text(Some(&self.name), "Name")?;
        Ok(())
    }
}
