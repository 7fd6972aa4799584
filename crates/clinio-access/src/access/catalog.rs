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

//! Custom role catalogue
//!
//! A point-in-time snapshot of the custom roles the resolver reads. The
//! resolver holds no cache of its own; callers rebuild the catalogue from
//! the role store after administrative mutations.

use crate::access::roles::Role;
use std::collections::HashMap;

/// Snapshot of custom role definitions, keyed by role id
#[derive(Debug, Clone, Default)]
pub struct RoleCatalog {
    roles: HashMap<String, Role>,
}

impl RoleCatalog {
    /// Build a catalogue from a list of custom roles
    pub fn new(roles: Vec<Role>) -> Self {
        Self {
            roles: roles.into_iter().map(|role| (role.id.clone(), role)).collect(),
        }
    }

    /// An empty catalogue (built-in roles only)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a custom role by id
    pub fn get(&self, role_id: &str) -> Option<&Role> {
        self.roles.get(role_id)
    }

    /// Whether a custom role with this id exists
    pub fn contains(&self, role_id: &str) -> bool {
        self.roles.contains_key(role_id)
    }

    /// Number of custom roles in the snapshot
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Whether the snapshot holds no custom roles
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Iterate over the custom roles
    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.roles.values()
    }
}
