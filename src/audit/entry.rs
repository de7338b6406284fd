//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::UserId;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Budget,
    User,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Budget => write!(f, "Budget"),
            EntityType::User => write!(f, "User"),
        }
    }
}

/// A single audit log entry
///
/// `before` is set for updates and deletes, `after` for creates and updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub entity_type: EntityType,
    pub entity_id: String,

    /// The principal that performed the operation; `None` for the local CLI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<UserId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn base(
        operation: Operation,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id: entity_id.into(),
            actor: None,
            entity_name,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            after: serde_json::to_value(entity).ok(),
            ..Self::base(Operation::Create, entity_type, entity_id, entity_name)
        }
    }

    /// Record an update, deriving the diff summary from the two states
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Self {
        let before = serde_json::to_value(before).ok();
        let after = serde_json::to_value(after).ok();
        let diff_summary = match (&before, &after) {
            (Some(b), Some(a)) => super::diff::generate_diff(b, a),
            _ => None,
        };

        Self {
            before,
            after,
            diff_summary,
            ..Self::base(Operation::Update, entity_type, entity_id, entity_name)
        }
    }

    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            before: serde_json::to_value(entity).ok(),
            ..Self::base(Operation::Delete, entity_type, entity_id, entity_name)
        }
    }

    /// Attribute the entry to a principal
    pub fn by(mut self, actor: Option<UserId>) -> Self {
        self.actor = actor;
        self
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        match &self.actor {
            Some(actor) => output.push_str(&format!(" by {}", actor)),
            None => output.push_str(" by cli"),
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_entry() {
        let entry = AuditEntry::create(
            EntityType::Budget,
            "1",
            Some("Groceries".to_string()),
            &json!({"name": "Groceries"}),
        );

        assert_eq!(entry.operation, Operation::Create);
        assert!(entry.before.is_none());
        assert!(entry.after.is_some());
        assert!(entry.actor.is_none());
    }

    #[test]
    fn test_update_entry_carries_diff() {
        let entry = AuditEntry::update(
            EntityType::Budget,
            "1",
            None,
            &json!({"name": "Groceries", "balance": 0}),
            &json!({"name": "Groceries", "balance": 500}),
        );

        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(entry.diff_summary.as_deref(), Some("balance: 0 -> 500"));
    }

    #[test]
    fn test_delete_entry_with_actor() {
        let actor = UserId::new();
        let entry = AuditEntry::delete(EntityType::Budget, "7", None, &json!({"name": "Old"}))
            .by(Some(actor));

        assert!(entry.after.is_none());
        assert_eq!(entry.actor, Some(actor));
        assert!(entry
            .format_human_readable()
            .contains(&format!("DELETE Budget 7 by {}", actor)));
    }

    #[test]
    fn test_human_readable_cli_actor() {
        let entry = AuditEntry::create(
            EntityType::User,
            "u-1",
            Some("alice".to_string()),
            &json!({}),
        );
        let formatted = entry.format_human_readable();
        assert!(formatted.contains("CREATE User u-1 (alice) by cli"));
    }
}
