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

//! Permission resolution
//!
//! This module provides the pure decision layer:
//! - Ordered access levels (`none < view < edit`)
//! - The static tab registry
//! - Built-in roles with their hard-coded default matrix, and custom roles
//! - The resolver computing effective levels with strict precedence
//! - The boolean access gate used by calling code

pub mod catalog;
pub mod gate;
pub mod level;
pub mod resolver;
pub mod roles;
pub mod tabs;

pub use catalog::*;
pub use gate::*;
pub use level::*;
pub use resolver::*;
pub use roles::*;
pub use tabs::*;
