use crate::core::models::audit_record::AuditRecord;

/// Next identifier for a record appended after `records`: one past the
/// tail, or 1 for an empty trail.
///
/// The result is only valid while the caller holds exclusive access to
/// the store and appends before releasing it. Allocating under one
/// acquisition and appending under another lets two writers observe the
/// same tail and mint duplicate ids.
pub fn next_id(records: &[AuditRecord]) -> u64 {
    records.last().map(|record| record.id + 1).unwrap_or(1)
}
