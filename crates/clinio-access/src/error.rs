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

//! Error handling for the access control core
//!
//! Validation and permission failures are returned to callers as explicit
//! results. The resolver itself never raises; it degrades to
//! [`crate::AccessLevel::None`] on any ambiguity.

use thiserror::Error;

/// Error types for access control operations
#[derive(Error, Debug)]
pub enum AccessError {
    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Duplicate role: {message}")]
    DuplicateRole { message: String },

    #[error("Self-modification blocked: {message}")]
    SelfModification { message: String },

    #[error("Role '{role_id}' is still assigned to {affected_users} user(s)")]
    RoleInUse { role_id: String, affected_users: usize },

    #[error("Unknown tab: {tab_id}")]
    UnknownTab { tab_id: String },

    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl AccessError {
    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            AccessError::PermissionDenied { .. } => "permission_denied",
            AccessError::NotFound { .. } => "not_found",
            AccessError::DuplicateRole { .. } => "duplicate_role",
            AccessError::SelfModification { .. } => "self_modification",
            AccessError::RoleInUse { .. } => "role_in_use",
            AccessError::UnknownTab { .. } => "unknown_tab",
            AccessError::InvalidData { .. } => "invalid_data",
            AccessError::Storage { .. } => "storage_error",
            AccessError::Serde(_) => "serialization_error",
        }
    }

    /// Shorthand for a storage failure carrying a source description
    pub fn storage(message: impl Into<String>) -> Self {
        AccessError::Storage { message: message.into() }
    }
}

/// Result type for access control operations
pub type AccessResult<T> = Result<T, AccessError>;
