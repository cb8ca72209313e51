use std::sync::Arc;

use crate::adapters::store::json_log_store::JsonLogStore;
use crate::config::trail_config::TrailConfig;
use crate::core::errors::Result;
use crate::core::models::audit_record::{AuditRecord, RecordDraft};
use crate::core::models::record_filter::RecordFilter;
use crate::core::services::access_coordinator::AccessCoordinator;
use crate::core::services::id_allocator;
use crate::core::traits::store::LogStore;

/// Shared handle to the audit trail.
///
/// Constructed once at startup and cloned into every business
/// repository and viewer that needs it; clones share one coordinator
/// and one backing store.
pub struct AuditTrail<S: LogStore> {
    coordinator: Arc<AccessCoordinator<S>>,
}

impl<S: LogStore> Clone for AuditTrail<S> {
    fn clone(&self) -> Self {
        Self {
            coordinator: Arc::clone(&self.coordinator),
        }
    }
}

impl AuditTrail<JsonLogStore> {
    /// Open the trail on the backing file named by `config`.
    pub fn open(config: &TrailConfig) -> Self {
        Self::with_store(JsonLogStore::new(&config.store.file))
    }
}

impl<S: LogStore> AuditTrail<S> {
    pub fn with_store(store: S) -> Self {
        Self {
            coordinator: Arc::new(AccessCoordinator::new(store)),
        }
    }

    /// Allocate the next id for `draft` and append the finished record,
    /// all inside one exclusive-access interval.
    ///
    /// Reading the tail and appending under a single holder is what
    /// keeps ids contiguous and duplicate-free across concurrent
    /// writers. Returns the record as persisted.
    pub fn record(&self, draft: RecordDraft) -> Result<AuditRecord> {
        self.coordinator.with_exclusive_access(|store| {
            let records = store.read_all()?;
            let record = draft.into_record(id_allocator::next_id(&records));
            store.append(record.clone())?;
            Ok(record)
        })
    }

    /// Append a caller-built record, serialized behind any in-flight
    /// access. Storage faults surface to the caller.
    pub fn append(&self, record: AuditRecord) -> Result<()> {
        self.coordinator
            .with_exclusive_access(|store| store.append(record))
    }

    /// Read the full trail in append order, serialized behind any
    /// in-flight write.
    ///
    /// The trail is secondary to the business operations it describes,
    /// so faults never propagate to the viewer: an unreadable or
    /// corrupt store is reported as a diagnostic and read as empty.
    pub fn read_all(&self) -> Vec<AuditRecord> {
        match self
            .coordinator
            .with_exclusive_access(|store| store.read_all())
        {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("audit trail read failed, showing empty trail: {e}");
                Vec::new()
            }
        }
    }

    /// Read the trail and keep only the records matching `filter`.
    /// A transient view; the stored sequence is untouched.
    pub fn read_filtered(&self, filter: &RecordFilter) -> Vec<AuditRecord> {
        self.read_all()
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect()
    }

    /// Shut the trail down: wake any blocked caller with an
    /// interruption and reject further access.
    pub fn close(&self) {
        self.coordinator.close();
    }
}
