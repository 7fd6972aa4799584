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

//! Administrative operations
//!
//! Role lifecycle and per-user override editing. Every operation is
//! gated on the acting user being a director and every mutation is
//! written to the audit log.

pub mod overrides;
pub mod roles;

pub use overrides::{OverrideChange, OverrideEditor};
pub use roles::{DeleteConfirmation, RoleAdmin, RoleDeletion, slugify};
