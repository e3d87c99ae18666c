//! Audit logging system for fintrack
//!
//! Records every create, update and delete with before/after snapshots and
//! the acting user in an append-only JSONL file.
//!
//! - `AuditEntry`: one logged operation
//! - `AuditLogger`: appends entries to and reads them from the log file
//! - `generate_diff`: one-line summary of what an update changed
//!
//! Services do not use the logger directly; they go through
//! `Storage::log_create`, `log_update` and `log_delete`.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
