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

//! Audit logging for access control operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Audit event types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AuditEventType {
    /// Custom role created
    RoleCreated,
    /// Custom role updated
    RoleUpdated,
    /// Custom role deleted
    RoleDeleted,
    /// Per-user tab override set
    OverrideSet,
    /// Per-user tab override cleared back to defaults
    OverrideCleared,
    /// Administrative operation denied
    OperationDenied,
    /// User held a role id outside the registry and the store
    UnmappedRole,
    /// Permission check referenced a tab outside the registry
    UnmappedTab,
}

/// Audit event result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum AuditResult {
    /// Operation succeeded
    Success,
    /// Operation was denied
    Denied,
    /// Non-fatal diagnostic; resolution degraded to no access
    Diagnostic,
}

/// Audit event entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Unique event ID
    pub id: String,

    /// Event type
    pub event_type: AuditEventType,

    /// Event timestamp
    pub timestamp: DateTime<Utc>,

    /// User who performed the action
    pub actor: String,

    /// Target user (if applicable)
    pub target_user: Option<String>,

    /// Tab involved (if applicable)
    pub tab: Option<String>,

    /// Event result
    pub result: AuditResult,

    /// Additional event details
    pub details: HashMap<String, String>,
}

impl AuditEvent {
    /// Create a new audit event
    pub fn new(event_type: AuditEventType, actor: String, result: AuditResult) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            event_type,
            timestamp: Utc::now(),
            actor,
            target_user: None,
            tab: None,
            result,
            details: HashMap::new(),
        }
    }

    /// Set target user
    pub fn with_target_user(mut self, target_user: String) -> Self {
        self.target_user = Some(target_user);
        self
    }

    /// Set the tab involved
    pub fn with_tab(mut self, tab: String) -> Self {
        self.tab = Some(tab);
        self
    }

    /// Add detail
    pub fn with_detail(mut self, key: String, value: String) -> Self {
        self.details.insert(key, value);
        self
    }
}

/// Audit logger for access control operations
///
/// Events are mirrored to structured logging and kept in a bounded
/// in-memory buffer for administrative inspection; a persistent sink can
/// subscribe to the record store separately.
#[derive(Debug)]
pub struct AuditLogger {
    events: Arc<RwLock<Vec<AuditEvent>>>,
    max_events: usize,
}

impl AuditLogger {
    /// Create a new audit logger keeping up to `max_events` entries
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
            max_events,
        }
    }

    /// Log an audit event
    pub async fn log_event(&self, event: AuditEvent) {
        match event.result {
            AuditResult::Success => {
                info!(
                    event_type = ?event.event_type,
                    actor = %event.actor,
                    target_user = ?event.target_user,
                    tab = ?event.tab,
                    "Audit event: {:?}", event.event_type
                );
            }
            AuditResult::Denied | AuditResult::Diagnostic => {
                warn!(
                    event_type = ?event.event_type,
                    actor = %event.actor,
                    target_user = ?event.target_user,
                    tab = ?event.tab,
                    result = ?event.result,
                    "Audit event: {:?} - {:?}", event.event_type, event.result
                );
            }
        }

        let mut events = self.events.write().await;
        events.push(event);

        if events.len() > self.max_events {
            let excess = events.len() - self.max_events;
            events.drain(0..excess);
        }
    }

    /// Log role creation
    pub async fn log_role_created(&self, role_id: &str, created_by: &str) {
        let event =
            AuditEvent::new(AuditEventType::RoleCreated, created_by.to_string(), AuditResult::Success).with_detail("role_id".to_string(), role_id.to_string());

        self.log_event(event).await;
    }

    /// Log role update
    pub async fn log_role_updated(&self, role_id: &str, updated_by: &str) {
        let event =
            AuditEvent::new(AuditEventType::RoleUpdated, updated_by.to_string(), AuditResult::Success).with_detail("role_id".to_string(), role_id.to_string());

        self.log_event(event).await;
    }

    /// Log role deletion, including how many users still held the role
    pub async fn log_role_deleted(&self, role_id: &str, affected_users: usize, deleted_by: &str) {
        let event = AuditEvent::new(AuditEventType::RoleDeleted, deleted_by.to_string(), AuditResult::Success)
            .with_detail("role_id".to_string(), role_id.to_string())
            .with_detail("affected_users".to_string(), affected_users.to_string());

        self.log_event(event).await;
    }

    /// Log a per-user override being set
    pub async fn log_override_set(&self, target_user: &str, tab: &str, level: &str, set_by: &str) {
        let event = AuditEvent::new(AuditEventType::OverrideSet, set_by.to_string(), AuditResult::Success)
            .with_target_user(target_user.to_string())
            .with_tab(tab.to_string())
            .with_detail("level".to_string(), level.to_string());

        self.log_event(event).await;
    }

    /// Log a per-user override being cleared back to role defaults
    pub async fn log_override_cleared(&self, target_user: &str, tab: &str, cleared_by: &str) {
        let event = AuditEvent::new(AuditEventType::OverrideCleared, cleared_by.to_string(), AuditResult::Success)
            .with_target_user(target_user.to_string())
            .with_tab(tab.to_string());

        self.log_event(event).await;
    }

    /// Log a permission check that hit a role outside the registry and the store
    pub async fn log_unmapped_role(&self, user_id: &str, role_id: &str, tab: &str) {
        let event = AuditEvent::new(AuditEventType::UnmappedRole, user_id.to_string(), AuditResult::Diagnostic)
            .with_tab(tab.to_string())
            .with_detail("role_id".to_string(), role_id.to_string());

        self.log_event(event).await;
    }

    /// Log a permission check that referenced a tab outside the registry
    pub async fn log_unmapped_tab(&self, user_id: &str, tab_id: &str) {
        let event = AuditEvent::new(AuditEventType::UnmappedTab, user_id.to_string(), AuditResult::Diagnostic).with_tab(tab_id.to_string());

        self.log_event(event).await;
    }

    /// Log a denied administrative operation
    pub async fn log_operation_denied(&self, actor: &str, operation: &str, reason: &str) {
        let event = AuditEvent::new(AuditEventType::OperationDenied, actor.to_string(), AuditResult::Denied)
            .with_detail("operation".to_string(), operation.to_string())
            .with_detail("reason".to_string(), reason.to_string());

        self.log_event(event).await;
    }

    /// Get audit events, newest first
    pub async fn get_events(&self, limit: Option<usize>) -> Vec<AuditEvent> {
        let events = self.events.read().await;

        if let Some(limit) = limit {
            events.iter().rev().take(limit).cloned().collect()
        } else {
            events.iter().rev().cloned().collect()
        }
    }

    /// Get events touching a specific user, newest first
    pub async fn get_user_events(&self, user_id: &str, limit: Option<usize>) -> Vec<AuditEvent> {
        let events = self.events.read().await;

        let user_events: Vec<AuditEvent> = events
            .iter()
            .filter(|event| event.actor == user_id || event.target_user.as_deref() == Some(user_id))
            .rev()
            .cloned()
            .collect();

        if let Some(limit) = limit { user_events.into_iter().take(limit).collect() } else { user_events }
    }

    /// Get audit statistics
    pub async fn get_statistics(&self) -> AuditStatistics {
        let events = self.events.read().await;

        let mut stats = AuditStatistics::default();
        stats.total_events = events.len();

        for event in events.iter() {
            match event.result {
                AuditResult::Success => stats.successful_events += 1,
                AuditResult::Denied => stats.denied_events += 1,
                AuditResult::Diagnostic => stats.diagnostic_events += 1,
            }

            *stats.events_by_type.entry(event.event_type.clone()).or_insert(0) += 1;
        }

        stats
    }
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new(10000)
    }
}

/// Audit statistics
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AuditStatistics {
    /// Total number of events
    pub total_events: usize,

    /// Number of successful events
    pub successful_events: usize,

    /// Number of denied events
    pub denied_events: usize,

    /// Number of non-fatal diagnostics
    pub diagnostic_events: usize,

    /// Events by type
    pub events_by_type: HashMap<AuditEventType, usize>,
}
