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

//! Role definitions: built-in roles, their default matrix, and custom roles
//!
//! Built-in roles are never stored as records; they are referenced by
//! reserved ids and carry a hard-coded default matrix. Custom roles are
//! director-created records with an explicit per-tab matrix and no implicit
//! defaults beyond it.

use crate::access::level::AccessLevel;
use crate::access::tabs::Tab;
use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Built-in roles with reserved ids and hard-coded defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinRole {
    /// The super-role: unconditional edit on every tab
    Director,
    Coordinator,
    Psychologist,
    Receptionist,
    Financeiro,
}

impl BuiltinRole {
    /// All built-in roles
    pub const ALL: [BuiltinRole; 5] = [
        BuiltinRole::Director,
        BuiltinRole::Coordinator,
        BuiltinRole::Psychologist,
        BuiltinRole::Receptionist,
        BuiltinRole::Financeiro,
    ];

    /// Reserved role id
    pub fn id(self) -> &'static str {
        match self {
            BuiltinRole::Director => "director",
            BuiltinRole::Coordinator => "coordinator",
            BuiltinRole::Psychologist => "psychologist",
            BuiltinRole::Receptionist => "receptionist",
            BuiltinRole::Financeiro => "financeiro",
        }
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            BuiltinRole::Director => "Director",
            BuiltinRole::Coordinator => "Coordinator",
            BuiltinRole::Psychologist => "Psychologist",
            BuiltinRole::Receptionist => "Receptionist",
            BuiltinRole::Financeiro => "Finance Staff",
        }
    }

    /// Parse a reserved id
    pub fn parse(id: &str) -> Option<BuiltinRole> {
        BuiltinRole::ALL.iter().copied().find(|role| role.id() == id)
    }

    /// Whether an id collides with a reserved built-in id
    pub fn is_reserved(id: &str) -> bool {
        BuiltinRole::parse(id).is_some()
    }

    /// Default level for this role on a tab, from the static matrix
    ///
    /// Membership in the edit list wins over the view list; a role in
    /// neither list gets no access. Director rows exist for completeness
    /// but the resolver short-circuits directors before reaching here.
    pub fn default_level(self, tab: Tab) -> AccessLevel {
        let (view, edit) = default_matrix(tab);
        if edit.contains(&self) {
            AccessLevel::Edit
        } else if view.contains(&self) {
            AccessLevel::View
        } else {
            AccessLevel::None
        }
    }
}

impl fmt::Display for BuiltinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Static default matrix: per tab, the roles granted view and edit
fn default_matrix(tab: Tab) -> (&'static [BuiltinRole], &'static [BuiltinRole]) {
    use BuiltinRole::*;
    match tab {
        Tab::ClientIntake => (&[Director, Coordinator, Psychologist], &[Director, Receptionist, Coordinator]),
        Tab::DailySchedule => (&[Director, Psychologist, Financeiro], &[Director, Receptionist, Coordinator]),
        Tab::FullHistory => (&[Director, Psychologist, Coordinator, Receptionist], &[Director, Coordinator]),
        Tab::MyPatients => (&[Director, Coordinator], &[Director, Psychologist]),
        Tab::Reports => (&[Director, Coordinator, Financeiro], &[Director]),
        Tab::Finance => (&[Director, Financeiro], &[Director, Financeiro]),
        Tab::Inventory => (&[Director, Coordinator], &[Director, Financeiro]),
        Tab::Employees => (&[Director, Coordinator], &[Director]),
        Tab::CoordinatorBoard => (&[Director, Psychologist, Receptionist], &[Director, Coordinator]),
    }
}

/// Reference to a role held by a user
///
/// Built-in ids parse to the closed variant; anything else is carried as a
/// custom role id and resolved against the role catalogue, failing closed
/// when the catalogue has no such role.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoleRef {
    Builtin(BuiltinRole),
    Custom(String),
}

impl RoleRef {
    /// Parse a role id string; never fails, unknown ids become `Custom`
    pub fn parse(id: &str) -> RoleRef {
        match BuiltinRole::parse(id) {
            Some(builtin) => RoleRef::Builtin(builtin),
            None => RoleRef::Custom(id.to_string()),
        }
    }

    /// The underlying role id
    pub fn as_str(&self) -> &str {
        match self {
            RoleRef::Builtin(builtin) => builtin.id(),
            RoleRef::Custom(id) => id.as_str(),
        }
    }

    /// Whether this is the director super-role
    pub fn is_director(&self) -> bool {
        matches!(self, RoleRef::Builtin(BuiltinRole::Director))
    }
}

impl fmt::Display for RoleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Role references serialize as the plain id string.
impl Serialize for RoleRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RoleRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        if id.is_empty() {
            return Err(D::Error::custom("role id must not be empty"));
        }
        Ok(RoleRef::parse(&id))
    }
}

/// Per-tab access matrix keyed by tab slug
pub type TabMatrix = BTreeMap<String, AccessLevel>;

/// Custom role record as persisted in the record store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    /// Unique slug, stable once created
    pub id: String,

    /// Display label; renaming does not change the id
    pub name: String,

    /// Always true for stored records; built-in roles are not stored
    pub is_custom: bool,

    /// Explicit per-tab matrix; absent tabs resolve to no access
    #[serde(default)]
    pub tab_access: TabMatrix,

    /// Record creation timestamp
    pub created_at: DateTime<Utc>,

    /// Record last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Create a new custom role
    pub fn new_custom(id: impl Into<String>, name: impl Into<String>, tab_access: TabMatrix) -> Self {
        let now = Utc::now();

        Self {
            id: id.into(),
            name: name.into(),
            is_custom: true,
            tab_access,
            created_at: now,
            updated_at: now,
        }
    }

    /// Level this role grants on a tab; absent entries mean no access
    pub fn level_for(&self, tab: Tab) -> AccessLevel {
        self.tab_access.get(tab.slug()).copied().unwrap_or(AccessLevel::None)
    }
}
