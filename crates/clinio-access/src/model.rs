// Clinio
// Copyright (C) 2025 Clinio Health

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! User data models

use crate::access::level::AccessLevel;
use crate::access::roles::RoleRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// User entity as persisted in the record store
///
/// `tab_access` keys are tab slugs. They stay plain strings so documents
/// written against an older tab registry deserialize cleanly; keys outside
/// the registry are never consulted during resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Role reference (built-in id or custom role id)
    pub role: RoleRef,

    /// Per-tab access overrides; absence means "use role defaults"
    #[serde(default)]
    pub tab_access: BTreeMap<String, AccessLevel>,

    /// Append-only log of prior edits to this record
    #[serde(default)]
    pub change_history: Vec<ChangeRecord>,
}

/// One entry in a user's change history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// When the edit happened
    pub timestamp: DateTime<Utc>,

    /// Identity of the editor
    pub edited_by: String,

    /// Fields changed by this edit
    pub changes: Vec<FieldChange>,
}

/// A single field transition inside a change record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldChange {
    /// Field name
    pub field: String,

    /// Previous value, serialized
    pub old_value: String,

    /// New value, serialized
    pub new_value: String,
}

impl User {
    /// Create a new user with no overrides and empty history
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: RoleRef) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            tab_access: BTreeMap::new(),
            change_history: Vec::new(),
        }
    }

    /// Whether this user holds the director super-role
    pub fn is_director(&self) -> bool {
        self.role.is_director()
    }

    /// Append a change record; history entries are never mutated or removed
    pub fn record_change(&mut self, edited_by: &str, changes: Vec<FieldChange>) {
        self.change_history.push(ChangeRecord {
            timestamp: Utc::now(),
            edited_by: edited_by.to_string(),
            changes,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::roles::BuiltinRole;

    #[test]
    fn test_user_creation() {
        let user = User::new("u1", "Ana", RoleRef::Builtin(BuiltinRole::Receptionist));

        assert_eq!(user.id, "u1");
        assert!(!user.is_director());
        assert!(user.tab_access.is_empty());
        assert!(user.change_history.is_empty());
    }

    #[test]
    fn test_change_history_is_append_only() {
        let mut user = User::new("u1", "Ana", RoleRef::Builtin(BuiltinRole::Director));

        user.record_change(
            "director",
            vec![FieldChange {
                field: "tab_access".to_string(),
                old_value: "{}".to_string(),
                new_value: "{\"finance\":\"view\"}".to_string(),
            }],
        );
        user.record_change("director", vec![]);

        assert_eq!(user.change_history.len(), 2);
        assert_eq!(user.change_history[0].changes[0].field, "tab_access");
    }

    #[test]
    fn test_user_roundtrip_tolerates_unknown_tab_keys() {
        let json = r#"{
            "id": "u2",
            "name": "Bia",
            "role": "psychologist",
            "tab_access": {"finance": "view", "legacy-tab": "edit"}
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.tab_access.len(), 2);
        assert_eq!(user.tab_access.get("finance"), Some(&AccessLevel::View));
    }
}
