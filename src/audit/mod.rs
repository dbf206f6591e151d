//! Audit trail for flip-ledger
//!
//! Every create, update and delete of a project, expense or category is
//! appended to `audit.log` as one JSON object per line. Updates carry a
//! short field-level diff so `flip audit` can show what changed.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
