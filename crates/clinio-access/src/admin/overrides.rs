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

//! Per-user tab overrides
//!
//! A director can pin a user's access on a single tab to an explicit
//! level, in either direction, or clear the pin so the role default
//! applies again. An explicit `none` override is stored like any other
//! level; only clearing removes the entry.

use crate::access::level::AccessLevel;
use crate::access::tabs::Tab;
use crate::audit::AuditLogger;
use crate::error::{AccessError, AccessResult};
use crate::model::{FieldChange, User};
use crate::store::users::UserStore;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// Requested change to a user's override on one tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideChange {
    /// Pin the tab to an explicit level
    Level(AccessLevel),
    /// Remove the pin so the role default applies
    Default,
}

impl OverrideChange {
    /// Parse from "none", "view", "edit" or "default"
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "default" => Some(OverrideChange::Default),
            other => AccessLevel::parse(other).map(OverrideChange::Level),
        }
    }
}

impl FromStr for OverrideChange {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| AccessError::InvalidData {
            message: format!("Invalid override value: {}", s),
        })
    }
}

/// Administrative interface for per-user overrides
#[derive(Clone)]
pub struct OverrideEditor {
    users: UserStore,
    audit: Arc<AuditLogger>,
}

impl OverrideEditor {
    /// Create a new override editor
    pub fn new(users: UserStore, audit: Arc<AuditLogger>) -> Self {
        Self { users, audit }
    }

    /// Set or clear a per-user override on one tab
    ///
    /// Only a director may call this, and never on their own record.
    /// A change that leaves the override map as it was is a no-op and
    /// writes no change history entry. Returns the updated user record.
    pub async fn set_user_override(&self, actor: &User, target_user_id: &str, tab_id: &str, change: OverrideChange) -> AccessResult<User> {
        if !actor.is_director() {
            let reason = "actor is not a director";
            self.audit.log_operation_denied(&actor.id, "set_user_override", reason).await;

            return Err(AccessError::PermissionDenied {
                message: "Setting per-user overrides requires the director role".to_string(),
            });
        }

        if actor.id == target_user_id {
            return Err(AccessError::SelfModification {
                message: "Directors cannot edit their own tab overrides".to_string(),
            });
        }

        let tab = Tab::parse(tab_id).ok_or_else(|| AccessError::UnknownTab { tab_id: tab_id.to_string() })?;

        let mut user = self.users.require(target_user_id).await?;
        let before = user.tab_access.clone();

        match change {
            OverrideChange::Level(level) => {
                user.tab_access.insert(tab.slug().to_string(), level);
            }
            OverrideChange::Default => {
                user.tab_access.remove(tab.slug());
            }
        }

        if user.tab_access == before {
            return Ok(user);
        }

        // The history snapshots the whole map, not just the touched key.
        let old_value = serde_json::to_string(&before)?;
        let new_value = serde_json::to_string(&user.tab_access)?;
        user.record_change(
            &actor.id,
            vec![FieldChange {
                field: "tab_access".to_string(),
                old_value,
                new_value,
            }],
        );

        self.users.update(&user).await?;

        match change {
            OverrideChange::Level(level) => {
                info!(target_user = %target_user_id, tab = %tab, level = %level, set_by = %actor.id, "Tab override set");
                self.audit.log_override_set(target_user_id, tab.slug(), level.as_str(), &actor.id).await;
            }
            OverrideChange::Default => {
                info!(target_user = %target_user_id, tab = %tab, cleared_by = %actor.id, "Tab override cleared");
                self.audit.log_override_cleared(target_user_id, tab.slug(), &actor.id).await;
            }
        }

        Ok(user)
    }
}
