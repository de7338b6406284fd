//! Audit logging for MyBudget
//!
//! Every create, update and delete of a budget or user is appended to
//! `audit.log` together with the acting principal and before/after values.
//!
//! - `AuditEntry`: one record with timestamp, operation, entity and actor.
//! - `AuditLogger`: appends entries as JSON lines and reads them back.
//! - `generate_diff`: top-level field diff stored on updates.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
