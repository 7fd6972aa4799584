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

//! Typed custom-role store over the generic record store

use crate::access::catalog::RoleCatalog;
use crate::access::roles::Role;
use crate::config::Config;
use crate::error::{AccessError, AccessResult};
use crate::store::RecordStore;
use serde_json::Value;
use std::sync::Arc;

/// Custom role persistence keyed by role id
#[derive(Clone)]
pub struct RoleStore {
    store: Arc<dyn RecordStore>,
    collection: String,
}

impl RoleStore {
    /// Create a role store over a record store
    pub fn new(store: Arc<dyn RecordStore>, config: &Config) -> Self {
        Self {
            store,
            collection: config.roles_collection.clone(),
        }
    }

    fn to_json(role: &Role) -> AccessResult<Value> {
        Ok(serde_json::to_value(role)?)
    }

    fn from_json(value: &Value) -> AccessResult<Role> {
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Get a custom role by id
    pub async fn get(&self, role_id: &str) -> AccessResult<Option<Role>> {
        match self.store.get(&self.collection, role_id).await? {
            Some(value) => Ok(Some(Self::from_json(&value)?)),
            None => Ok(None),
        }
    }

    /// Get a custom role by id, failing when absent
    pub async fn require(&self, role_id: &str) -> AccessResult<Role> {
        self.get(role_id).await?.ok_or_else(|| AccessError::NotFound {
            message: format!("custom role '{}' does not exist", role_id),
        })
    }

    /// Whether a custom role with this id exists
    pub async fn exists(&self, role_id: &str) -> AccessResult<bool> {
        Ok(self.store.get(&self.collection, role_id).await?.is_some())
    }

    /// All custom roles
    pub async fn list(&self) -> AccessResult<Vec<Role>> {
        let records = self.store.list(&self.collection).await?;

        records.iter().map(|(_, value)| Self::from_json(value)).collect()
    }

    /// Insert a new custom role
    pub async fn insert(&self, role: &Role) -> AccessResult<()> {
        self.store.insert(&self.collection, &role.id, Self::to_json(role)?).await
    }

    /// Update an existing custom role
    pub async fn update(&self, role: &Role) -> AccessResult<()> {
        self.store.update(&self.collection, &role.id, Self::to_json(role)?).await
    }

    /// Delete a custom role by id
    pub async fn delete(&self, role_id: &str) -> AccessResult<()> {
        self.store.delete(&self.collection, role_id).await
    }

    /// Build a resolver catalogue snapshot from the stored roles
    pub async fn catalog(&self) -> AccessResult<RoleCatalog> {
        Ok(RoleCatalog::new(self.list().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::level::AccessLevel;
    use crate::access::roles::TabMatrix;
    use crate::store::memory::MemoryStore;

    fn store() -> RoleStore {
        RoleStore::new(Arc::new(MemoryStore::new()), &Config::default())
    }

    #[tokio::test]
    async fn test_role_roundtrip() {
        let roles = store();

        let mut matrix = TabMatrix::new();
        matrix.insert("reports".to_string(), AccessLevel::View);
        roles.insert(&Role::new_custom("auditor", "Auditor", matrix)).await.unwrap();

        assert!(roles.exists("auditor").await.unwrap());
        let loaded = roles.require("auditor").await.unwrap();
        assert_eq!(loaded.name, "Auditor");
        assert!(loaded.is_custom);

        roles.delete("auditor").await.unwrap();
        assert!(!roles.exists("auditor").await.unwrap());
        assert!(roles.require("auditor").await.is_err());
    }

    #[tokio::test]
    async fn test_catalog_snapshot() {
        let roles = store();
        roles.insert(&Role::new_custom("auditor", "Auditor", TabMatrix::new())).await.unwrap();
        roles.insert(&Role::new_custom("intern", "Intern", TabMatrix::new())).await.unwrap();

        let catalog = roles.catalog().await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("auditor"));
    }
}
