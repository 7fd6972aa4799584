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

//! In-memory record store

use crate::error::{AccessError, AccessResult};
use crate::store::RecordStore;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::collections::BTreeMap;

/// In-memory [`RecordStore`] backed by concurrent maps
///
/// Collections are created lazily on first write. Records keep insertion
/// order per collection via their ids (`BTreeMap` inside each shard) so
/// listings are deterministic in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<String, BTreeMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in a collection
    pub fn count(&self, collection: &str) -> usize {
        self.collections.get(collection).map(|records| records.len()).unwrap_or(0)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> AccessResult<Option<Value>> {
        Ok(self.collections.get(collection).and_then(|records| records.get(id).cloned()))
    }

    async fn find(&self, collection: &str, field: &str, value: &Value) -> AccessResult<Vec<(String, Value)>> {
        let Some(records) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(records
            .iter()
            .filter(|(_, record)| record.get(field) == Some(value))
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect())
    }

    async fn list(&self, collection: &str) -> AccessResult<Vec<(String, Value)>> {
        let Some(records) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(records.iter().map(|(id, record)| (id.clone(), record.clone())).collect())
    }

    async fn insert(&self, collection: &str, id: &str, value: Value) -> AccessResult<()> {
        let mut records = self.collections.entry(collection.to_string()).or_default();

        if records.contains_key(id) {
            return Err(AccessError::storage(format!("record '{}' already exists in '{}'", id, collection)));
        }

        records.insert(id.to_string(), value);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, value: Value) -> AccessResult<()> {
        let mut records = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| AccessError::storage(format!("unknown collection '{}'", collection)))?;

        match records.get_mut(id) {
            Some(record) => {
                *record = value;
                Ok(())
            }
            None => Err(AccessError::storage(format!("record '{}' not found in '{}'", id, collection))),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> AccessResult<()> {
        let mut records = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| AccessError::storage(format!("unknown collection '{}'", collection)))?;

        match records.remove(id) {
            Some(_) => Ok(()),
            None => Err(AccessError::storage(format!("record '{}' not found in '{}'", id, collection))),
        }
    }
}
