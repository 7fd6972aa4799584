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

//! Permission resolver
//!
//! Computes the effective access level for a (user, tab) pair with strict
//! precedence:
//!
//! 1. Director super-role: `edit`, terminal, overrides any stray override.
//! 2. Per-user override for the tab (including an explicit `none`).
//! 3. Role defaults: the built-in matrix, or a custom role's own matrix.
//!
//! Any unresolvable state (tab outside the registry, role id mapping to
//! neither a built-in nor a stored custom role) yields `none` with a
//! diagnostic, never a grant and never a panic. The registry boundary runs
//! before everything else: an out-of-registry tab id denies even a
//! director, since a grant on an unknown resource is meaningless.

use crate::access::catalog::RoleCatalog;
use crate::access::level::AccessLevel;
use crate::access::roles::RoleRef;
use crate::access::tabs::Tab;
use crate::model::User;
use tracing::{debug, warn};

/// Non-fatal condition hit while resolving; resolution degraded to `none`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionDiagnostic {
    /// The requested tab id is outside the registry
    UnmappedTab { tab_id: String },
    /// The user's role id maps to neither a built-in nor a stored custom role
    UnmappedRole { role_id: String, tab: Tab },
}

/// Resolve the effective access level for a user on a tab id
///
/// The tab id is taken as a string so identifiers from outside the registry
/// fail closed here instead of at every call site.
pub fn resolve(user: &User, catalog: &RoleCatalog, tab_id: &str) -> AccessLevel {
    resolve_detailed(user, catalog, tab_id).0
}

/// Resolve an access level, also reporting the fail-closed condition hit
///
/// Callers with an audit log at hand (the gate) forward the diagnostic;
/// everyone else uses [`resolve`] and gets the `tracing` emission only.
pub fn resolve_detailed(user: &User, catalog: &RoleCatalog, tab_id: &str) -> (AccessLevel, Option<ResolutionDiagnostic>) {
    match Tab::parse(tab_id) {
        Some(tab) => resolve_tab_detailed(user, catalog, tab),
        None => {
            warn!(user_id = %user.id, tab_id = %tab_id, "Unmapped tab in permission check, denying");
            (AccessLevel::None, Some(ResolutionDiagnostic::UnmappedTab { tab_id: tab_id.to_string() }))
        }
    }
}

/// Resolve the effective access level for a user on a registry tab
pub fn resolve_tab(user: &User, catalog: &RoleCatalog, tab: Tab) -> AccessLevel {
    resolve_tab_detailed(user, catalog, tab).0
}

fn resolve_tab_detailed(user: &User, catalog: &RoleCatalog, tab: Tab) -> (AccessLevel, Option<ResolutionDiagnostic>) {
    // Director bypass is terminal; a stray override cannot downgrade it.
    if user.role.is_director() {
        return (AccessLevel::Edit, None);
    }

    // Overrides beat defaults, including overriding downward.
    if let Some(level) = user.tab_access.get(tab.slug()) {
        debug!(user_id = %user.id, tab = %tab, level = %level, "Per-user override applied");
        return (*level, None);
    }

    match &user.role {
        RoleRef::Builtin(builtin) => (builtin.default_level(tab), None),
        RoleRef::Custom(role_id) => match catalog.get(role_id) {
            Some(role) => (role.level_for(tab), None),
            None => {
                warn!(user_id = %user.id, role_id = %role_id, tab = %tab, "Unmapped role in permission check, denying");
                (
                    AccessLevel::None,
                    Some(ResolutionDiagnostic::UnmappedRole {
                        role_id: role_id.clone(),
                        tab,
                    }),
                )
            }
        },
    }
}

/// Whether the user may view the tab; safe with no authenticated user
pub fn can_view(user: Option<&User>, catalog: &RoleCatalog, tab_id: &str) -> bool {
    match user {
        Some(user) => resolve(user, catalog, tab_id).grants_view(),
        None => false,
    }
}

/// Whether the user may edit the tab; safe with no authenticated user
pub fn can_edit(user: Option<&User>, catalog: &RoleCatalog, tab_id: &str) -> bool {
    match user {
        Some(user) => resolve(user, catalog, tab_id).grants_edit(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::roles::{BuiltinRole, Role, TabMatrix};

    fn user_with_role(role: &str) -> User {
        User::new("u1", "Test User", RoleRef::parse(role))
    }

    #[test]
    fn test_director_always_edits() {
        let mut director = user_with_role("director");
        // A stray downward override must not lock the director out.
        director.tab_access.insert("finance".to_string(), AccessLevel::None);

        let catalog = RoleCatalog::empty();
        for tab in Tab::ALL {
            assert_eq!(resolve_tab(&director, &catalog, tab), AccessLevel::Edit);
        }
    }

    #[test]
    fn test_override_beats_default_both_directions() {
        let catalog = RoleCatalog::empty();

        let mut financeiro = user_with_role("financeiro");
        assert_eq!(resolve(&financeiro, &catalog, "finance"), AccessLevel::Edit);

        financeiro.tab_access.insert("finance".to_string(), AccessLevel::View);
        assert_eq!(resolve(&financeiro, &catalog, "finance"), AccessLevel::View);

        financeiro.tab_access.insert("finance".to_string(), AccessLevel::None);
        assert_eq!(resolve(&financeiro, &catalog, "finance"), AccessLevel::None);

        // Upward override on a tab the role has no default for.
        let mut receptionist = user_with_role("receptionist");
        assert_eq!(resolve(&receptionist, &catalog, "finance"), AccessLevel::None);
        receptionist.tab_access.insert("finance".to_string(), AccessLevel::Edit);
        assert_eq!(resolve(&receptionist, &catalog, "finance"), AccessLevel::Edit);
    }

    #[test]
    fn test_custom_role_matrix_is_exhaustive() {
        let mut matrix = TabMatrix::new();
        matrix.insert("my-patients".to_string(), AccessLevel::Edit);
        matrix.insert("reports".to_string(), AccessLevel::View);

        let catalog = RoleCatalog::new(vec![Role::new_custom("chief_psychologist", "Chief Psychologist", matrix)]);
        let chief = user_with_role("chief_psychologist");

        assert_eq!(resolve(&chief, &catalog, "my-patients"), AccessLevel::Edit);
        assert_eq!(resolve(&chief, &catalog, "reports"), AccessLevel::View);
        // Tabs absent from the matrix resolve to none, no implicit defaults.
        assert_eq!(resolve(&chief, &catalog, "finance"), AccessLevel::None);
        assert_eq!(resolve(&chief, &catalog, "daily-schedule"), AccessLevel::None);
    }

    #[test]
    fn test_unmapped_role_fails_closed() {
        let catalog = RoleCatalog::empty();
        let intern = user_with_role("intern_x");

        for tab in Tab::ALL {
            assert_eq!(resolve_tab(&intern, &catalog, tab), AccessLevel::None);
        }
    }

    #[test]
    fn test_unmapped_tab_fails_closed() {
        let catalog = RoleCatalog::empty();
        let financeiro = user_with_role("financeiro");

        assert_eq!(resolve(&financeiro, &catalog, "payroll"), AccessLevel::None);

        // The registry boundary runs first, so even a director is denied
        // on a tab id the registry does not know.
        let director = user_with_role("director");
        assert_eq!(resolve(&director, &catalog, "payroll"), AccessLevel::None);
    }

    #[test]
    fn test_detailed_resolution_reports_diagnostics() {
        let catalog = RoleCatalog::empty();

        let financeiro = user_with_role("financeiro");
        let (level, diagnostic) = resolve_detailed(&financeiro, &catalog, "finance");
        assert_eq!(level, AccessLevel::Edit);
        assert_eq!(diagnostic, None);

        let (level, diagnostic) = resolve_detailed(&financeiro, &catalog, "payroll");
        assert_eq!(level, AccessLevel::None);
        assert_eq!(diagnostic, Some(ResolutionDiagnostic::UnmappedTab { tab_id: "payroll".to_string() }));

        let intern = user_with_role("intern_x");
        let (level, diagnostic) = resolve_detailed(&intern, &catalog, "finance");
        assert_eq!(level, AccessLevel::None);
        assert_eq!(
            diagnostic,
            Some(ResolutionDiagnostic::UnmappedRole {
                role_id: "intern_x".to_string(),
                tab: Tab::Finance,
            })
        );
    }

    #[test]
    fn test_unknown_override_keys_are_ignored() {
        let catalog = RoleCatalog::empty();
        let mut financeiro = user_with_role("financeiro");
        financeiro.tab_access.insert("legacy-tab".to_string(), AccessLevel::Edit);

        // The stray key changes nothing for registry tabs.
        assert_eq!(resolve(&financeiro, &catalog, "finance"), AccessLevel::Edit);
        assert_eq!(resolve(&financeiro, &catalog, "employees"), AccessLevel::None);
    }

    #[test]
    fn test_no_authenticated_user() {
        let catalog = RoleCatalog::empty();
        assert!(!can_view(None, &catalog, "finance"));
        assert!(!can_edit(None, &catalog, "finance"));
    }

    #[test]
    fn test_builtin_defaults_sampled() {
        let catalog = RoleCatalog::empty();

        let receptionist = user_with_role("receptionist");
        assert_eq!(resolve(&receptionist, &catalog, "client-intake"), AccessLevel::Edit);
        assert_eq!(resolve(&receptionist, &catalog, "full-history"), AccessLevel::View);
        assert_eq!(resolve(&receptionist, &catalog, "finance"), AccessLevel::None);

        let psychologist = user_with_role("psychologist");
        assert_eq!(resolve(&psychologist, &catalog, "my-patients"), AccessLevel::Edit);
        assert_eq!(resolve(&psychologist, &catalog, "daily-schedule"), AccessLevel::View);

        let coordinator = user_with_role("coordinator");
        assert_eq!(resolve(&coordinator, &catalog, "coordinator-board"), AccessLevel::Edit);
        assert_eq!(resolve(&coordinator, &catalog, "reports"), AccessLevel::View);
    }
}
