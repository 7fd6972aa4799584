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

//! Typed user store over the generic record store

use crate::access::roles::{BuiltinRole, RoleRef};
use crate::config::Config;
use crate::error::{AccessError, AccessResult};
use crate::model::User;
use crate::store::RecordStore;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

/// User persistence keyed by user id
#[derive(Clone)]
pub struct UserStore {
    store: Arc<dyn RecordStore>,
    collection: String,
}

impl UserStore {
    /// Create a user store over a record store
    pub fn new(store: Arc<dyn RecordStore>, config: &Config) -> Self {
        Self {
            store,
            collection: config.users_collection.clone(),
        }
    }

    fn to_json(user: &User) -> AccessResult<Value> {
        Ok(serde_json::to_value(user)?)
    }

    fn from_json(value: &Value) -> AccessResult<User> {
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Get a user by id
    pub async fn get(&self, user_id: &str) -> AccessResult<Option<User>> {
        match self.store.get(&self.collection, user_id).await? {
            Some(value) => Ok(Some(Self::from_json(&value)?)),
            None => Ok(None),
        }
    }

    /// Get a user by id, failing when absent
    pub async fn require(&self, user_id: &str) -> AccessResult<User> {
        self.get(user_id).await?.ok_or_else(|| AccessError::NotFound {
            message: format!("user '{}' does not exist", user_id),
        })
    }

    /// Insert a new user
    pub async fn insert(&self, user: &User) -> AccessResult<()> {
        self.store.insert(&self.collection, &user.id, Self::to_json(user)?).await
    }

    /// Update an existing user
    pub async fn update(&self, user: &User) -> AccessResult<()> {
        self.store.update(&self.collection, &user.id, Self::to_json(user)?).await
    }

    /// All users currently holding a role id
    pub async fn with_role(&self, role_id: &str) -> AccessResult<Vec<User>> {
        let records = self.store.find(&self.collection, "role", &json!(role_id)).await?;

        records.iter().map(|(_, value)| Self::from_json(value)).collect()
    }

    /// Number of users currently holding a role id
    pub async fn count_with_role(&self, role_id: &str) -> AccessResult<usize> {
        Ok(self.store.find(&self.collection, "role", &json!(role_id)).await?.len())
    }

    /// Ensure the bootstrap director exists so a fresh deployment is
    /// administrable
    pub async fn ensure_bootstrap_director(&self, config: &Config) -> AccessResult<User> {
        if let Some(existing) = self.get(&config.bootstrap_director_id).await? {
            return Ok(existing);
        }

        let director = User::new(
            config.bootstrap_director_id.clone(),
            config.bootstrap_director_name.clone(),
            RoleRef::Builtin(BuiltinRole::Director),
        );
        self.insert(&director).await?;

        info!(user_id = %director.id, "Bootstrap director created");
        Ok(director)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn store() -> UserStore {
        UserStore::new(Arc::new(MemoryStore::new()), &Config::default())
    }

    #[tokio::test]
    async fn test_user_roundtrip() {
        let users = store();
        let user = User::new("u1", "Ana", RoleRef::parse("receptionist"));

        users.insert(&user).await.unwrap();
        let loaded = users.require("u1").await.unwrap();
        assert_eq!(loaded.name, "Ana");
        assert_eq!(loaded.role, RoleRef::parse("receptionist"));

        assert!(users.get("u2").await.unwrap().is_none());
        assert!(users.require("u2").await.is_err());
    }

    #[tokio::test]
    async fn test_with_role() {
        let users = store();
        users.insert(&User::new("u1", "Ana", RoleRef::parse("financeiro"))).await.unwrap();
        users.insert(&User::new("u2", "Bia", RoleRef::parse("financeiro"))).await.unwrap();
        users.insert(&User::new("u3", "Caio", RoleRef::parse("chief_psychologist"))).await.unwrap();

        assert_eq!(users.count_with_role("financeiro").await.unwrap(), 2);
        assert_eq!(users.with_role("chief_psychologist").await.unwrap().len(), 1);
        assert_eq!(users.count_with_role("director").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_bootstrap_director_is_idempotent() {
        let users = store();
        let config = Config::default();

        let first = users.ensure_bootstrap_director(&config).await.unwrap();
        let second = users.ensure_bootstrap_director(&config).await.unwrap();

        assert_eq!(first.id, second.id);
        assert!(first.is_director());
        assert_eq!(users.count_with_role("director").await.unwrap(), 1);
    }
}
