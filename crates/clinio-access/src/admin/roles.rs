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

//! Custom role lifecycle
//!
//! Roles are created from a display name; the stored id is a slug of
//! that name and stays stable across renames. Built-in role ids are
//! reserved and can never be shadowed by a custom role. Deleting a role
//! that is still assigned requires an explicit confirmation.

use crate::access::roles::{BuiltinRole, Role, TabMatrix};
use crate::access::tabs::Tab;
use crate::audit::AuditLogger;
use crate::error::{AccessError, AccessResult};
use crate::model::User;
use crate::store::roles::RoleStore;
use crate::store::users::UserStore;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Derive a role id from a display name
///
/// Lowercases, collapses whitespace to underscores and strips everything
/// that is not alphanumeric or an underscore.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_separator = true;

    for ch in name.trim().chars() {
        if ch.is_whitespace() {
            if !last_was_separator {
                slug.push('_');
                last_was_separator = true;
            }
        } else if ch.is_alphanumeric() || ch == '_' {
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
            last_was_separator = false;
        }
    }

    while slug.ends_with('_') {
        slug.pop();
    }

    slug
}

/// Confirmation state for deleting a role that is still assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteConfirmation {
    /// First attempt; fails when the role is still assigned
    Unconfirmed,
    /// Caller acknowledged the affected users and wants the delete anyway
    Confirmed,
}

/// Outcome of a completed role deletion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDeletion {
    /// Id of the deleted role
    pub role_id: String,

    /// Users who held the role at deletion time and now resolve to no access
    pub affected_users: usize,
}

/// Administrative interface for custom roles
///
/// All mutations require the acting user to be a director.
#[derive(Clone)]
pub struct RoleAdmin {
    roles: RoleStore,
    users: UserStore,
    audit: Arc<AuditLogger>,
}

impl RoleAdmin {
    /// Create a new role administrator
    pub fn new(roles: RoleStore, users: UserStore, audit: Arc<AuditLogger>) -> Self {
        Self { roles, users, audit }
    }

    /// Deny the operation unless the actor is a director
    async fn require_director(&self, actor: &User, operation: &str) -> AccessResult<()> {
        if actor.is_director() {
            return Ok(());
        }

        let reason = "actor is not a director";
        self.audit.log_operation_denied(&actor.id, operation, reason).await;

        Err(AccessError::PermissionDenied {
            message: format!("Operation '{}' requires the director role", operation),
        })
    }

    /// Drop matrix entries that do not name a known tab
    fn sanitize_matrix(matrix: TabMatrix) -> TabMatrix {
        let mut sanitized = BTreeMap::new();

        for (tab_id, level) in matrix {
            if Tab::parse(&tab_id).is_some() {
                sanitized.insert(tab_id, level);
            } else {
                warn!(tab_id = %tab_id, "Dropping matrix entry for unknown tab");
            }
        }

        sanitized
    }

    /// Create a custom role from a display name and a tab matrix
    ///
    /// Tabs absent from the matrix resolve to no access for holders of
    /// the role.
    pub async fn create_role(&self, actor: &User, name: &str, matrix: TabMatrix) -> AccessResult<Role> {
        self.require_director(actor, "create_role").await?;

        let role_id = slugify(name);
        if role_id.is_empty() {
            return Err(AccessError::InvalidData {
                message: format!("Role name '{}' does not yield a usable id", name),
            });
        }

        if BuiltinRole::is_reserved(&role_id) {
            return Err(AccessError::DuplicateRole {
                message: format!("Role id '{}' is reserved for a built-in role", role_id),
            });
        }

        if self.roles.exists(&role_id).await? {
            return Err(AccessError::DuplicateRole {
                message: format!("Role '{}' already exists", role_id),
            });
        }

        let role = Role::new_custom(role_id.clone(), name.trim(), Self::sanitize_matrix(matrix));
        self.roles.insert(&role).await?;

        info!(role_id = %role_id, created_by = %actor.id, "Custom role created");
        self.audit.log_role_created(&role_id, &actor.id).await;

        Ok(role)
    }

    /// Update a custom role's display name and tab matrix
    ///
    /// The role id never changes, so existing user records keep pointing
    /// at the role across renames.
    pub async fn update_role(&self, actor: &User, role_id: &str, name: &str, matrix: TabMatrix) -> AccessResult<Role> {
        self.require_director(actor, "update_role").await?;

        // Built-in roles are never stored, so they fall out here as not found.
        let mut role = self.roles.require(role_id).await?;

        role.name = name.trim().to_string();
        role.tab_access = Self::sanitize_matrix(matrix);
        role.updated_at = Utc::now();

        self.roles.update(&role).await?;

        info!(role_id = %role_id, updated_by = %actor.id, "Custom role updated");
        self.audit.log_role_updated(role_id, &actor.id).await;

        Ok(role)
    }

    /// Delete a custom role
    ///
    /// When users still hold the role, the first unconfirmed attempt
    /// fails with the affected user count so the caller can ask for
    /// confirmation. A confirmed delete proceeds; the affected users
    /// keep their role id and resolve to no access on every tab until
    /// reassigned.
    pub async fn delete_role(&self, actor: &User, role_id: &str, confirmation: DeleteConfirmation) -> AccessResult<RoleDeletion> {
        self.require_director(actor, "delete_role").await?;

        if !self.roles.exists(role_id).await? {
            return Err(AccessError::NotFound {
                message: format!("Role '{}' not found", role_id),
            });
        }

        let affected_users = self.users.count_with_role(role_id).await?;
        if affected_users > 0 && confirmation == DeleteConfirmation::Unconfirmed {
            return Err(AccessError::RoleInUse {
                role_id: role_id.to_string(),
                affected_users,
            });
        }

        self.roles.delete(role_id).await?;

        info!(role_id = %role_id, affected_users, deleted_by = %actor.id, "Custom role deleted");
        self.audit.log_role_deleted(role_id, affected_users, &actor.id).await;

        Ok(RoleDeletion {
            role_id: role_id.to_string(),
            affected_users,
        })
    }

    /// Users currently holding the given role
    pub async fn users_affected(&self, role_id: &str) -> AccessResult<Vec<User>> {
        self.users.with_role(role_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::level::AccessLevel;
    use crate::access::roles::RoleRef;
    use crate::config::Config;
    use crate::store::memory::MemoryStore;

    fn admin() -> (RoleAdmin, UserStore) {
        let store: Arc<dyn crate::store::RecordStore> = Arc::new(MemoryStore::new());
        let config = Config::default();
        let roles = RoleStore::new(store.clone(), &config);
        let users = UserStore::new(store, &config);
        (RoleAdmin::new(roles, users.clone(), Arc::new(AuditLogger::default())), users)
    }

    fn director() -> User {
        User::new("director", "Clinic Director", RoleRef::parse("director"))
    }

    fn matrix(entries: &[(&str, AccessLevel)]) -> TabMatrix {
        entries.iter().map(|(tab, level)| (tab.to_string(), *level)).collect()
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Chief Psychologist"), "chief_psychologist");
        assert_eq!(slugify("  Night   Shift  "), "night_shift");
        assert_eq!(slugify("Recepção (2º andar)"), "recepção_2º_andar");
        assert_eq!(slugify("!!!"), "");
    }

    #[tokio::test]
    async fn test_create_role_happy_path() {
        let (admin, _) = admin();

        let role = admin
            .create_role(&director(), "Chief Psychologist", matrix(&[("my-patients", AccessLevel::Edit), ("reports", AccessLevel::View)]))
            .await
            .unwrap();

        assert_eq!(role.id, "chief_psychologist");
        assert_eq!(role.name, "Chief Psychologist");
        assert!(role.is_custom);
        assert_eq!(role.level_for(Tab::MyPatients), AccessLevel::Edit);
        assert_eq!(role.level_for(Tab::Finance), AccessLevel::None);
    }

    #[tokio::test]
    async fn test_create_role_requires_director() {
        let (admin, _) = admin();
        let actor = User::new("u1", "Ana", RoleRef::parse("coordinator"));

        let err = admin.create_role(&actor, "Auditor", TabMatrix::new()).await.unwrap_err();
        assert!(matches!(err, AccessError::PermissionDenied { .. }));
    }

    #[tokio::test]
    async fn test_create_role_rejects_reserved_and_duplicate_ids() {
        let (admin, _) = admin();

        let err = admin.create_role(&director(), "Director", TabMatrix::new()).await.unwrap_err();
        assert!(matches!(err, AccessError::DuplicateRole { .. }));

        admin.create_role(&director(), "Auditor", TabMatrix::new()).await.unwrap();
        let err = admin.create_role(&director(), "auditor", TabMatrix::new()).await.unwrap_err();
        assert!(matches!(err, AccessError::DuplicateRole { .. }));
    }

    #[tokio::test]
    async fn test_create_role_rejects_empty_slug() {
        let (admin, _) = admin();

        let err = admin.create_role(&director(), "???", TabMatrix::new()).await.unwrap_err();
        assert!(matches!(err, AccessError::InvalidData { .. }));
    }

    #[tokio::test]
    async fn test_create_role_drops_unknown_tabs() {
        let (admin, _) = admin();

        let role = admin
            .create_role(&director(), "Auditor", matrix(&[("reports", AccessLevel::View), ("time-travel", AccessLevel::Edit)]))
            .await
            .unwrap();

        assert!(role.tab_access.contains_key("reports"));
        assert!(!role.tab_access.contains_key("time-travel"));
    }

    #[tokio::test]
    async fn test_update_role_keeps_id_across_rename() {
        let (admin, _) = admin();

        admin.create_role(&director(), "Auditor", matrix(&[("reports", AccessLevel::View)])).await.unwrap();
        let updated = admin
            .update_role(&director(), "auditor", "Senior Auditor", matrix(&[("reports", AccessLevel::Edit)]))
            .await
            .unwrap();

        assert_eq!(updated.id, "auditor");
        assert_eq!(updated.name, "Senior Auditor");
        assert_eq!(updated.level_for(Tab::Reports), AccessLevel::Edit);
    }

    #[tokio::test]
    async fn test_update_builtin_role_is_not_found() {
        let (admin, _) = admin();

        let err = admin.update_role(&director(), "psychologist", "Psych", TabMatrix::new()).await.unwrap_err();
        assert!(matches!(err, AccessError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_unassigned_role() {
        let (admin, _) = admin();

        admin.create_role(&director(), "Auditor", TabMatrix::new()).await.unwrap();
        let deletion = admin.delete_role(&director(), "auditor", DeleteConfirmation::Unconfirmed).await.unwrap();

        assert_eq!(deletion.affected_users, 0);
        assert!(admin.users_affected("auditor").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_assigned_role_needs_confirmation() {
        let (admin, users) = admin();

        admin.create_role(&director(), "Auditor", TabMatrix::new()).await.unwrap();
        users.insert(&User::new("u1", "Ana", RoleRef::parse("auditor"))).await.unwrap();

        let err = admin.delete_role(&director(), "auditor", DeleteConfirmation::Unconfirmed).await.unwrap_err();
        assert!(matches!(err, AccessError::RoleInUse { affected_users: 1, .. }));

        let deletion = admin.delete_role(&director(), "auditor", DeleteConfirmation::Confirmed).await.unwrap();
        assert_eq!(deletion.affected_users, 1);
    }

    #[tokio::test]
    async fn test_delete_missing_role_is_not_found() {
        let (admin, _) = admin();

        let err = admin.delete_role(&director(), "ghost", DeleteConfirmation::Confirmed).await.unwrap_err();
        assert!(matches!(err, AccessError::NotFound { .. }));
    }
}
