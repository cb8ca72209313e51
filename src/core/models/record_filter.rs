use chrono::NaiveDate;

use crate::core::models::audit_record::{AuditAction, AuditRecord};

/// Display-side filter over the audit trail.
///
/// Filters produce a transient view for viewers; the stored sequence is
/// never touched. An empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Keep only records with this action.
    pub action: Option<AuditAction>,
    /// Keep only records whose timestamp falls on this calendar date.
    pub on_date: Option<NaiveDate>,
}

impl RecordFilter {
    /// Filter that matches every record.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_action(action: AuditAction) -> Self {
        Self {
            action: Some(action),
            ..Self::default()
        }
    }

    pub fn by_date(date: NaiveDate) -> Self {
        Self {
            on_date: Some(date),
            ..Self::default()
        }
    }

    pub fn with_action(mut self, action: AuditAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.on_date = Some(date);
        self
    }

    /// Whether `record` passes every set criterion.
    ///
    /// Date matching compares the `YYYY-MM-DD` prefix of the timestamp,
    /// which is exact for the trail's fixed format.
    pub fn matches(&self, record: &AuditRecord) -> bool {
        if let Some(action) = &self.action
            && record.action != *action
        {
            return false;
        }

        if let Some(date) = &self.on_date {
            let prefix = date.format("%Y-%m-%d").to_string();
            if !record.timestamp.starts_with(&prefix) {
                return false;
            }
        }

        true
    }
}
