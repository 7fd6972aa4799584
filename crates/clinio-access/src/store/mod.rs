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

//! Record storage layer
//!
//! Persistence is delegated to an external record store exposing generic
//! document operations over named collections. The typed user and role
//! stores sit on top of that seam; [`memory::MemoryStore`] backs tests and
//! embedding without an external provider.

pub mod memory;
pub mod roles;
pub mod users;

pub use memory::*;
pub use roles::*;
pub use users::*;

use crate::error::AccessResult;
use async_trait::async_trait;
use serde_json::Value;

/// Generic record store over JSON documents keyed by collection and id
///
/// Each mutation is a single atomic external call; a conflicting concurrent
/// write must surface as an error so the caller retries the whole
/// read-modify-write, never as an implicit merge.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Get a record by id
    async fn get(&self, collection: &str, id: &str) -> AccessResult<Option<Value>>;

    /// Find records whose top-level `field` equals `value`
    async fn find(&self, collection: &str, field: &str, value: &Value) -> AccessResult<Vec<(String, Value)>>;

    /// List all records in a collection
    async fn list(&self, collection: &str) -> AccessResult<Vec<(String, Value)>>;

    /// Insert a record; fails if the id already exists
    async fn insert(&self, collection: &str, id: &str, value: Value) -> AccessResult<()>;

    /// Update an existing record; fails if the id does not exist
    async fn update(&self, collection: &str, id: &str, value: Value) -> AccessResult<()>;

    /// Delete a record by id; fails if the id does not exist
    async fn delete(&self, collection: &str, id: &str) -> AccessResult<()>;
}
