use serde::{Deserialize, Serialize};

/// Format of the `timestamp` field: local date-time at second precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sentinel for a value that does not exist on one side of a change,
/// e.g. the old value of a freshly added entity.
pub const NOT_APPLICABLE: &str = "N/A";

/// Sentinel for the new value of a removed entity.
pub const DELETED: &str = "Deleted";

/// Kinds of state-changing actions that get recorded in the trail.
///
/// The wire names (including the space in `UPDATE STATUS`) are the tags
/// persisted in the backing file and shown by audit viewers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AuditAction {
    #[serde(rename = "ADD")]
    Add,
    #[serde(rename = "UPDATE")]
    Update,
    #[serde(rename = "DELETE")]
    Delete,
    #[serde(rename = "UPDATE STATUS")]
    UpdateStatus,
}

impl AuditAction {
    /// The persisted tag for this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Add => "ADD",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
            AuditAction::UpdateStatus => "UPDATE STATUS",
        }
    }

    /// Parse a tag, ignoring case. Viewers pass through user-selected
    /// filter values, so `"update status"` is as valid as the wire form.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.to_uppercase().as_str() {
            "ADD" => Some(AuditAction::Add),
            "UPDATE" => Some(AuditAction::Update),
            "DELETE" => Some(AuditAction::Delete),
            "UPDATE STATUS" => Some(AuditAction::UpdateStatus),
            _ => None,
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of the user who performed the change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActorRole {
    Admin,
    User,
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActorRole::Admin => f.write_str("Admin"),
            ActorRole::User => f.write_str("User"),
        }
    }
}

/// Who is performing a change. Passed explicitly by the calling
/// repository; system-triggered actions carry no user id.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub id: Option<u64>,
    pub role: ActorRole,
}

impl Actor {
    pub fn admin(id: u64) -> Self {
        Self {
            id: Some(id),
            role: ActorRole::Admin,
        }
    }

    pub fn user(id: u64) -> Self {
        Self {
            id: Some(id),
            role: ActorRole::User,
        }
    }

    /// An action triggered by the application itself rather than a
    /// logged-in user.
    pub fn system() -> Self {
        Self {
            id: None,
            role: ActorRole::Admin,
        }
    }
}

/// A single immutable record in the audit trail.
///
/// Once appended, a record is never updated or deleted; readers only
/// derive transient filtered views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: u64,
    pub actor_id: Option<u64>,
    pub actor_role: ActorRole,
    pub action: AuditAction,
    pub entity_name: String,
    pub old_value: String,
    pub new_value: String,
    pub timestamp: String,
}

/// A record under construction by a business repository: everything but
/// the id, which is only allocated once the trail holds exclusive access
/// to the backing file.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDraft {
    pub actor: Actor,
    pub action: AuditAction,
    pub entity_name: String,
    pub old_value: String,
    pub new_value: String,
    pub timestamp: String,
}

impl RecordDraft {
    /// Build a draft with an explicit old/new value pair, stamped now.
    pub fn new(
        actor: Actor,
        action: AuditAction,
        entity_name: &str,
        old_value: &str,
        new_value: &str,
    ) -> Self {
        Self {
            actor,
            action,
            entity_name: entity_name.to_string(),
            old_value: old_value.to_string(),
            new_value: new_value.to_string(),
            timestamp: now_stamp(),
        }
    }

    /// An entity was created; there is no old value.
    pub fn added(actor: Actor, entity_name: &str, new_value: &str) -> Self {
        Self::new(actor, AuditAction::Add, entity_name, NOT_APPLICABLE, new_value)
    }

    /// An entity's fields changed.
    pub fn updated(actor: Actor, entity_name: &str, old_value: &str, new_value: &str) -> Self {
        Self::new(actor, AuditAction::Update, entity_name, old_value, new_value)
    }

    /// An entity was removed; the new value is the `Deleted` sentinel.
    pub fn deleted(actor: Actor, entity_name: &str, old_value: &str) -> Self {
        Self::new(actor, AuditAction::Delete, entity_name, old_value, DELETED)
    }

    /// An entity moved between workflow states, e.g. PENDING → APPROVED.
    pub fn status_changed(
        actor: Actor,
        entity_name: &str,
        old_status: &str,
        new_status: &str,
    ) -> Self {
        Self::new(
            actor,
            AuditAction::UpdateStatus,
            entity_name,
            old_status,
            new_status,
        )
    }

    /// Finish the draft with its allocated id.
    pub fn into_record(self, id: u64) -> AuditRecord {
        AuditRecord {
            id,
            actor_id: self.actor.id,
            actor_role: self.actor.role,
            action: self.action,
            entity_name: self.entity_name,
            old_value: self.old_value,
            new_value: self.new_value,
            timestamp: self.timestamp,
        }
    }
}

/// Current local time in the trail's fixed timestamp format.
pub fn now_stamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_wire_names_round_trip() {
        let json = serde_json::to_string(&AuditAction::UpdateStatus).unwrap();
        assert_eq!(json, "\"UPDATE STATUS\"");

        let parsed: AuditAction = serde_json::from_str("\"DELETE\"").unwrap();
        assert_eq!(parsed, AuditAction::Delete);
    }

    #[test]
    fn action_parse_ignores_case() {
        assert_eq!(AuditAction::parse("add"), Some(AuditAction::Add));
        assert_eq!(
            AuditAction::parse("update status"),
            Some(AuditAction::UpdateStatus)
        );
        assert_eq!(AuditAction::parse("ALL"), None);
    }

    #[test]
    fn added_draft_uses_not_applicable_sentinel() {
        let draft = RecordDraft::added(Actor::admin(1), "Client", "Jane Doe");
        assert_eq!(draft.old_value, NOT_APPLICABLE);
        assert_eq!(draft.new_value, "Jane Doe");
        assert_eq!(draft.action, AuditAction::Add);
    }

    #[test]
    fn deleted_draft_uses_deleted_sentinel() {
        let draft = RecordDraft::deleted(Actor::user(7), "Proposal", "Q3 expansion");
        assert_eq!(draft.new_value, DELETED);
        assert_eq!(draft.action, AuditAction::Delete);
    }

    #[test]
    fn system_actor_has_no_id() {
        let draft = RecordDraft::updated(Actor::system(), "User", "old", "new");
        let record = draft.into_record(4);
        assert_eq!(record.actor_id, None);
        assert_eq!(record.id, 4);
    }

    #[test]
    fn timestamp_has_second_precision() {
        let stamp = now_stamp();
        // e.g. "2026-08-07 14:03:59"
        assert_eq!(stamp.len(), 19);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[10..11], " ");
        assert_eq!(&stamp[16..17], ":");
    }

    #[test]
    fn record_serializes_with_wire_tags() {
        let record = RecordDraft::status_changed(Actor::admin(2), "Proposal", "PENDING", "APPROVED")
            .into_record(1);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"action\":\"UPDATE STATUS\""));
        assert!(json.contains("\"actor_role\":\"Admin\""));

        let back: AuditRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
