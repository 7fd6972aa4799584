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

//! Access level ordering

use serde::{Deserialize, Serialize};
use std::fmt;

/// Effective access level for a user against a tab
///
/// Totally ordered: `None < View < Edit`. `Edit` implies `View`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// No access
    None,

    /// Read-only access
    View,

    /// Full read/write access
    Edit,
}

impl AccessLevel {
    /// Whether this level satisfies a view check
    pub fn grants_view(self) -> bool {
        self >= AccessLevel::View
    }

    /// Whether this level satisfies an edit check
    pub fn grants_edit(self) -> bool {
        self == AccessLevel::Edit
    }

    /// Stable string form, matching the serialized representation
    pub fn as_str(self) -> &'static str {
        match self {
            AccessLevel::None => "none",
            AccessLevel::View => "view",
            AccessLevel::Edit => "edit",
        }
    }

    /// Parse from the stable string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(AccessLevel::None),
            "view" => Some(AccessLevel::View),
            "edit" => Some(AccessLevel::Edit),
            _ => None,
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
