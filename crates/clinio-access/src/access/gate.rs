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

//! Access gate
//!
//! Thin boolean facade over the resolver for calling code. The gate owns a
//! [`RoleCatalog`] snapshot; rebuild the gate (or swap the snapshot) after
//! role administration mutates the catalogue.

use crate::access::catalog::RoleCatalog;
use crate::access::level::AccessLevel;
use crate::access::resolver::{self, ResolutionDiagnostic};
use crate::audit::AuditLogger;
use crate::model::User;

/// Boolean `can_view`/`can_edit` checks over a role catalogue snapshot
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    catalog: RoleCatalog,
}

impl AccessGate {
    /// Create a gate over a catalogue snapshot
    pub fn new(catalog: RoleCatalog) -> Self {
        Self { catalog }
    }

    /// Replace the catalogue snapshot after role administration
    pub fn refresh(&mut self, catalog: RoleCatalog) {
        self.catalog = catalog;
    }

    /// The current catalogue snapshot
    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    /// Effective level for the user on the tab; `None` when signed out
    pub fn level(&self, user: Option<&User>, tab_id: &str) -> AccessLevel {
        match user {
            Some(user) => resolver::resolve(user, &self.catalog, tab_id),
            None => AccessLevel::None,
        }
    }

    /// Effective level, with fail-closed conditions written to the audit log
    ///
    /// Same result as [`AccessGate::level`]; unmapped-role and unmapped-tab
    /// hits additionally land in the audit log as diagnostic events.
    pub async fn level_audited(&self, user: Option<&User>, tab_id: &str, audit: &AuditLogger) -> AccessLevel {
        let Some(user) = user else {
            return AccessLevel::None;
        };

        let (level, diagnostic) = resolver::resolve_detailed(user, &self.catalog, tab_id);
        match diagnostic {
            Some(ResolutionDiagnostic::UnmappedTab { tab_id }) => audit.log_unmapped_tab(&user.id, &tab_id).await,
            Some(ResolutionDiagnostic::UnmappedRole { role_id, tab }) => audit.log_unmapped_role(&user.id, &role_id, tab.slug()).await,
            None => {}
        }

        level
    }

    /// Whether the user may view the tab
    pub fn can_view(&self, user: Option<&User>, tab_id: &str) -> bool {
        resolver::can_view(user, &self.catalog, tab_id)
    }

    /// Whether the user may edit the tab
    pub fn can_edit(&self, user: Option<&User>, tab_id: &str) -> bool {
        resolver::can_edit(user, &self.catalog, tab_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::roles::{Role, RoleRef, TabMatrix};

    #[test]
    fn test_gate_checks() {
        let gate = AccessGate::new(RoleCatalog::empty());
        let financeiro = User::new("u1", "Tes", RoleRef::parse("financeiro"));

        assert!(gate.can_view(Some(&financeiro), "finance"));
        assert!(gate.can_edit(Some(&financeiro), "finance"));
        assert!(!gate.can_view(Some(&financeiro), "employees"));
        assert!(!gate.can_view(None, "finance"));
    }

    #[tokio::test]
    async fn test_audited_level_records_diagnostics() {
        use crate::audit::{AuditEventType, AuditResult};

        let gate = AccessGate::new(RoleCatalog::empty());
        let audit = AuditLogger::default();

        let intern = User::new("u3", "Ivo", RoleRef::parse("intern_x"));
        assert_eq!(gate.level_audited(Some(&intern), "finance", &audit).await, AccessLevel::None);
        assert_eq!(gate.level_audited(Some(&intern), "payroll", &audit).await, AccessLevel::None);

        // An ordinary grant and a signed-out check leave no audit trace.
        let financeiro = User::new("u1", "Fia", RoleRef::parse("financeiro"));
        assert_eq!(gate.level_audited(Some(&financeiro), "finance", &audit).await, AccessLevel::Edit);
        assert_eq!(gate.level_audited(None, "finance", &audit).await, AccessLevel::None);

        let events = audit.get_events(None).await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, AuditEventType::UnmappedTab);
        assert_eq!(events[1].event_type, AuditEventType::UnmappedRole);
        assert!(events.iter().all(|event| event.result == AuditResult::Diagnostic));
    }

    #[test]
    fn test_gate_refresh_picks_up_new_roles() {
        let mut gate = AccessGate::new(RoleCatalog::empty());
        let auditor = User::new("u2", "Ava", RoleRef::parse("auditor"));

        // Unknown custom role: fail closed.
        assert!(!gate.can_view(Some(&auditor), "reports"));

        let mut matrix = TabMatrix::new();
        matrix.insert("reports".to_string(), AccessLevel::View);
        gate.refresh(RoleCatalog::new(vec![Role::new_custom("auditor", "Auditor", matrix)]));

        assert!(gate.can_view(Some(&auditor), "reports"));
        assert!(!gate.can_edit(Some(&auditor), "reports"));
    }
}
