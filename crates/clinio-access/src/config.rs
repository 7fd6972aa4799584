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

//! Configuration management for the access control core

use std::env;

/// Configuration for the access control core
#[derive(Debug, Clone)]
pub struct Config {
    /// Record store collection holding user profiles
    pub users_collection: String,

    /// Record store collection holding custom role definitions
    pub roles_collection: String,

    /// Maximum number of audit events kept in memory
    pub audit_max_events: usize,

    /// User id of the bootstrap director created on first run
    pub bootstrap_director_id: String,

    /// Display name of the bootstrap director
    pub bootstrap_director_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            users_collection: "users".to_string(),
            roles_collection: "roles".to_string(),
            audit_max_events: 10000,
            bootstrap_director_id: "director".to_string(),
            bootstrap_director_name: "Clinic Director".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            users_collection: env::var("CLINIO_USERS_COLLECTION").unwrap_or_else(|_| "users".to_string()),

            roles_collection: env::var("CLINIO_ROLES_COLLECTION").unwrap_or_else(|_| "roles".to_string()),

            audit_max_events: env::var("CLINIO_AUDIT_MAX_EVENTS").ok().and_then(|v| v.parse().ok()).unwrap_or(10000),

            bootstrap_director_id: env::var("CLINIO_BOOTSTRAP_DIRECTOR_ID").unwrap_or_else(|_| "director".to_string()),

            bootstrap_director_name: env::var("CLINIO_BOOTSTRAP_DIRECTOR_NAME").unwrap_or_else(|_| "Clinic Director".to_string()),
        }
    }
}
