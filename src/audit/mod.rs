//! Audit logging for EasyFinance
//!
//! Every create, update and delete performed through the service layer is
//! appended to `audit.log` as one JSON line with before/after snapshots.
//!
//! ```rust,ignore
//! use easyfinance::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(
//!     EntityType::Project,
//!     project.id().to_string(),
//!     Some(project.name().to_string()),
//!     &project,
//! ))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
