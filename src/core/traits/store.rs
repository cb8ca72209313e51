use crate::core::errors::Result;
use crate::core::models::audit_record::AuditRecord;

/// Port for the durable holder of the audit record sequence.
///
/// Implementations persist the full ordered sequence as one aggregate
/// value and must treat a missing or empty backing medium as an empty
/// sequence. They are not responsible for concurrency control; callers
/// go through the access coordinator.
pub trait LogStore: Send + Sync {
    /// Append one record to the persisted sequence.
    fn append(&self, record: AuditRecord) -> Result<()>;

    /// Read the full persisted sequence in append order.
    fn read_all(&self) -> Result<Vec<AuditRecord>>;
}
