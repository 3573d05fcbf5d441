//! Stateless permission evaluation.
//!
//! Pure reads over the session's granted set:
//! - No IO
//! - No panics
//! - No business logic (membership test only)

use crate::Session;

/// Check a single permission code against the (possibly absent) session.
///
/// No session denies everything; a superuser session grants everything; any
/// other session is a membership test in its granted set.
pub fn has_permission(session: Option<&Session>, code: &str) -> bool {
    match session {
        None => false,
        Some(s) if s.is_superuser => true,
        Some(s) => s.permissions.contains(code),
    }
}

/// True if any of `codes` is granted. Short-circuits on the first hit.
pub fn has_any<'a, I>(session: Option<&Session>, codes: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    codes.into_iter().any(|code| has_permission(session, code))
}

/// True if all of `codes` are granted. Short-circuits on the first miss.
///
/// Without a session this is `false` even for an empty list; with a session,
/// an empty list is vacuously true.
pub fn has_all<'a, I>(session: Option<&Session>, codes: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    session.is_some() && codes.into_iter().all(|code| has_permission(session, code))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use sitedesk_core::{TenantId, UserId};

    use crate::{Role, Session};

    use super::*;

    fn tenant_session(permissions: &[&str]) -> Session {
        Session {
            user_id: UserId::new(),
            email: "pm@acme-build.test".to_string(),
            display_name: "Site PM".to_string(),
            role: Role::new("project_manager"),
            is_superuser: false,
            tenant: Some(TenantId::new()),
            tenant_slug: Some("acme-build".to_string()),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn superuser_session() -> Session {
        Session {
            user_id: UserId::new(),
            email: "ops@sitedesk.test".to_string(),
            display_name: "Operator".to_string(),
            role: Role::new("superadmin"),
            is_superuser: true,
            tenant: None,
            tenant_slug: None,
            permissions: HashSet::new(),
        }
    }

    #[test]
    fn no_session_denies_everything() {
        assert!(!has_permission(None, "projects.read"));
        assert!(!has_any(None, ["projects.read", "invoices.read"]));
        assert!(!has_all(None, ["projects.read"]));
        assert!(!has_all(None, []));
    }

    #[test]
    fn superuser_grants_any_code() {
        let session = superuser_session();
        assert!(has_permission(Some(&session), "projects.read"));
        assert!(has_permission(Some(&session), "made.up.code"));
        assert!(has_all(Some(&session), ["a", "b", "c"]));
    }

    #[test]
    fn tenant_user_is_a_membership_test() {
        let session = tenant_session(&["projects.read", "invoices.create"]);
        assert!(has_permission(Some(&session), "projects.read"));
        assert!(!has_permission(Some(&session), "invoices.delete"));
    }

    #[test]
    fn has_any_short_circuits_to_first_hit() {
        let session = tenant_session(&["invoices.create"]);
        assert!(has_any(Some(&session), ["missing", "invoices.create"]));
        assert!(!has_any(Some(&session), ["missing", "also.missing"]));
    }

    #[test]
    fn has_all_requires_full_membership() {
        let session = tenant_session(&["projects.read", "invoices.create"]);
        assert!(has_all(Some(&session), ["projects.read", "invoices.create"]));
        assert!(!has_all(Some(&session), ["projects.read", "invoices.delete"]));
        assert!(has_all(Some(&session), []));
    }
}
