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

//! Clinio access control core
//!
//! This crate is the access-control resolution and role-management layer of
//! the Clinio clinic-management platform. It computes effective permission
//! levels for (user, tab) pairs from layered sources (the director
//! super-role, per-user overrides, built-in role defaults and custom role
//! matrices) and manages the lifecycle of custom roles. Persistence and
//! identity are delegated to external collaborators behind the
//! [`store::RecordStore`] and [`identity::IdentityProvider`] seams.

pub mod access;
pub mod admin;
pub mod audit;
pub mod config;
pub mod error;
pub mod identity;
pub mod model;
pub mod store;


pub use access::gate::AccessGate;
pub use access::level::AccessLevel;
pub use access::resolver::{can_edit, can_view, resolve};
pub use access::roles::{BuiltinRole, Role, RoleRef};
pub use access::tabs::Tab;
pub use error::{AccessError, AccessResult};
pub use model::User;
