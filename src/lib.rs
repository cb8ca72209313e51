//! Papertrail keeps a durable, append-only audit trail of state-changing
//! business actions in a single backing file, safe to share between
//! concurrent writers and readers.
//!
//! Business repositories record what changed (who, what, old and new
//! value); the audit viewer reads the whole trail back. All access to the
//! backing file is serialized by an exclusive-access coordinator, and a
//! background dispatch queue lets callers hand off a record without
//! blocking on log I/O.

pub mod adapters;
pub mod config;
pub mod core;

pub use crate::adapters::store::json_log_store::JsonLogStore;
pub use crate::config::trail_config::{DispatchSection, StoreSection, TrailConfig};
pub use crate::core::errors::{Result, TrailError};
pub use crate::core::models::audit_record::{
    Actor, ActorRole, AuditAction, AuditRecord, RecordDraft, DELETED, NOT_APPLICABLE,
    TIMESTAMP_FORMAT,
};
pub use crate::core::models::record_filter::RecordFilter;
pub use crate::core::services::access_coordinator::AccessCoordinator;
pub use crate::core::services::audit_trail::AuditTrail;
pub use crate::core::services::dispatch_queue::DispatchQueue;
pub use crate::core::traits::store::LogStore;
