use serde::Serialize;
use tracing::debug;

use crate::error::{AccessError, AccessResult};

use super::principal::{Role, User};

/// Entry point for anonymous callers.
pub const LOGIN_PATH: &str = "/login";

/// One menu row. `suffix` is appended to the role's base path; the dashboard
/// row uses an empty suffix. `icon` is the key the presentation layer maps
/// to its icon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub suffix: &'static str,
    pub icon: &'static str,
}

impl NavItem {
    pub fn path(&self, base: &str) -> String {
        format!("{base}{}", self.suffix)
    }
}

/// Static per-role routing configuration. Defined once below; never built
/// at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleRouteEntry {
    pub base_path: &'static str,
    pub display_name: &'static str,
    pub nav: &'static [NavItem],
}

const fn item(label: &'static str, suffix: &'static str, icon: &'static str) -> NavItem {
    NavItem { label, suffix, icon }
}

static STUDENT_NAV: [NavItem; 3] = [
    item("Dashboard", "", "layout-dashboard"),
    item("Attendance", "/attendance", "calendar"),
    item("Leave/On-Duty", "/leave", "file-text"),
];

static FACULTY_NAV: [NavItem; 5] = [
    item("Dashboard", "", "layout-dashboard"),
    item("Mark Attendance", "/mark-attendance", "clipboard-list"),
    item("Biometric Log", "/history", "fingerprint"),
    item("Timetable", "/timetable", "calendar-days"),
    item("Leave/On-Duty", "/leave", "file-text"),
];

static HOD_NAV: [NavItem; 4] = [
    item("Dashboard", "", "layout-dashboard"),
    item("Staff Attendance", "/staff", "users"),
    item("Student Attendance", "/students", "graduation-cap"),
    item("Approvals", "/approvals", "user-check"),
];

static SUPER_ADMIN_NAV: [NavItem; 4] = [
    item("Dashboard", "", "layout-dashboard"),
    item("Manage Users", "/users", "users"),
    item("Departments", "/departments", "building-2"),
    item("All Attendance", "/attendance", "clipboard-list"),
];

static EXECUTIVE_ADMIN_NAV: [NavItem; 4] = [
    item("Dashboard", "", "layout-dashboard"),
    item("View Users", "/users", "users"),
    item("View Attendance", "/attendance", "clipboard-list"),
    item("View Departments", "/departments", "building-2"),
];

static ACADEMIC_ADMIN_NAV: [NavItem; 3] = [
    item("Dashboard", "", "layout-dashboard"),
    item("Students", "/students", "graduation-cap"),
    item("Attendance", "/attendance", "clipboard-list"),
];

/// The whole role→route table. Exhaustive over `Role`, so a new role without
/// routes is a compile error rather than a runtime fallback.
pub fn route_entry(role: Role) -> RoleRouteEntry {
    match role {
        Role::Student => RoleRouteEntry {
            base_path: "/student",
            display_name: "Student",
            nav: &STUDENT_NAV,
        },
        Role::Faculty => RoleRouteEntry {
            base_path: "/faculty",
            display_name: "Faculty",
            nav: &FACULTY_NAV,
        },
        Role::Hod => RoleRouteEntry {
            base_path: "/hod",
            display_name: "Head of Department",
            nav: &HOD_NAV,
        },
        Role::SuperAdmin => RoleRouteEntry {
            base_path: "/admin/super",
            display_name: "Super Admin",
            nav: &SUPER_ADMIN_NAV,
        },
        Role::ExecutiveAdmin => RoleRouteEntry {
            base_path: "/admin/executive",
            display_name: "Executive Admin",
            nav: &EXECUTIVE_ADMIN_NAV,
        },
        Role::AcademicAdmin => RoleRouteEntry {
            base_path: "/admin/academic",
            display_name: "Academic Admin",
            nav: &ACADEMIC_ADMIN_NAV,
        },
    }
}

pub fn base_path(role: Role) -> &'static str {
    route_entry(role).base_path
}

/// Fixed, ordered menu for a role. Dashboard is always the first row.
pub fn nav_items(role: Role) -> &'static [NavItem] {
    route_entry(role).nav
}

/// Full menu paths in display order.
pub fn nav_paths(role: Role) -> Vec<String> {
    let entry = route_entry(role);
    entry.nav.iter().map(|i| i.path(entry.base_path)).collect()
}

/// Where a session should land: the login page when anonymous, else the
/// role's dashboard root.
pub fn landing_path(user: Option<&User>) -> String {
    match user {
        None => LOGIN_PATH.to_string(),
        Some(u) => base_path(u.role).to_string(),
    }
}

/// Derived convention, not a table entry: every role reaches notifications
/// under its own base path.
pub fn notifications_path(role: Role) -> String {
    format!("{}/notifications", base_path(role))
}

/// Whether shared administrative pages expose mutating controls. Keyed by
/// the role whose pages are rendered, not by the session role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Full,
    ViewOnly,
}

pub fn view_mode(role: Role) -> ViewMode {
    match role {
        Role::ExecutiveAdmin => ViewMode::ViewOnly,
        _ => ViewMode::Full,
    }
}

/// Outcome of the navigation guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Allow { view_mode: ViewMode },
    Redirect(String),
}

/// Guard applied at the boundary of every protected view: anonymous callers
/// are sent to the login page before any protected data is read, and a path
/// outside the caller's permitted set bounces back to their own dashboard.
pub fn resolve_navigation(user: Option<&User>, path: &str) -> Navigation {
    let Some(user) = user else {
        debug!("nav.guard anonymous path={path} -> {LOGIN_PATH}");
        return Navigation::Redirect(LOGIN_PATH.to_string());
    };
    let entry = route_entry(user.role);
    let permitted = path == entry.base_path
        || entry.nav.iter().any(|i| i.path(entry.base_path) == path)
        || path == notifications_path(user.role);
    if permitted {
        Navigation::Allow { view_mode: view_mode(user.role) }
    } else {
        debug!("nav.guard role={} path={path} -> {}", user.role.as_str(), entry.base_path);
        Navigation::Redirect(entry.base_path.to_string())
    }
}

/// Startup completeness check over the closed role set: every role has a
/// menu starting with its dashboard row, and base paths are unique. A
/// failure is a configuration bug and callers should abort.
pub fn verify_route_table() -> AccessResult<()> {
    let mut seen = std::collections::HashSet::new();
    for role in Role::ALL {
        let entry = route_entry(role);
        if entry.nav.is_empty() {
            return Err(AccessError::config(format!("role {} has an empty menu", role.as_str())));
        }
        let first = &entry.nav[0];
        if first.label != "Dashboard" || !first.suffix.is_empty() {
            return Err(AccessError::config(format!(
                "role {} menu must start with its dashboard",
                role.as_str()
            )));
        }
        if !seen.insert(entry.base_path) {
            return Err(AccessError::config(format!(
                "duplicate base path {} for role {}",
                entry.base_path,
                role.as_str()
            )));
        }
    }
    Ok(())
}
