//! Role → landing view and navigation tables.

use serde::Serialize;

use crate::enums::Role;

/// Where unauthenticated callers are sent.
pub const LOGIN_PATH: &str = "/login";

/// One navigation entry for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
}

const SECURITY_NAV: &[NavItem] = &[
    NavItem {
        href: "/security/dashboard",
        label: "Dashboard",
    },
    NavItem {
        href: "/security/today-visitors",
        label: "Today's Visitors",
    },
];

const MEMBER_NAV: &[NavItem] = &[
    NavItem {
        href: "/member/dashboard",
        label: "Dashboard",
    },
    NavItem {
        href: "/member/visitors",
        label: "My Visitors",
    },
];

const ADMIN_NAV: &[NavItem] = &[
    NavItem {
        href: "/admin/dashboard",
        label: "Dashboard",
    },
    NavItem {
        href: "/admin/visitors",
        label: "All Visitors",
    },
    NavItem {
        href: "/admin/members",
        label: "Members",
    },
    NavItem {
        href: "/admin/security-staff",
        label: "Security Staff",
    },
];

/// Landing view after sign-in. No role means the login page.
#[must_use]
pub const fn landing_path(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Security) => "/security/dashboard",
        Some(Role::Member) => "/member/dashboard",
        Some(Role::Admin) => "/admin/dashboard",
        None => LOGIN_PATH,
    }
}

#[must_use]
pub const fn nav_items(role: Option<Role>) -> &'static [NavItem] {
    match role {
        Some(Role::Security) => SECURITY_NAV,
        Some(Role::Member) => MEMBER_NAV,
        Some(Role::Admin) => ADMIN_NAV,
        None => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_lands_on_its_dashboard() {
        assert_eq!(landing_path(Some(Role::Security)), "/security/dashboard");
        assert_eq!(landing_path(Some(Role::Member)), "/member/dashboard");
        assert_eq!(landing_path(Some(Role::Admin)), "/admin/dashboard");
        assert_eq!(landing_path(None), "/login");
    }

    #[test]
    fn landing_path_is_the_first_nav_entry() {
        for role in [Role::Security, Role::Member, Role::Admin] {
            assert_eq!(nav_items(Some(role))[0].href, landing_path(Some(role)));
        }
        assert!(nav_items(None).is_empty());
    }
}
