//! Access-model integration tests: credential resolution, session
//! persistence across simulated restarts, and the routing surface built on
//! top of both. Positive and negative paths for each login scenario.

use tempfile::tempdir;

use erp_access::error::AccessError;
use erp_access::identity::{
    landing_path, nav_items, notifications_path, resolve_navigation, verify_route_table,
    view_mode, CredentialProvider, DirectoryAuthProvider, LoginRequest, Navigation, Role,
    SessionStore, ViewMode,
};
use erp_access::security::Directory;

fn demo_provider() -> DirectoryAuthProvider {
    DirectoryAuthProvider::new(Directory::seed_demo().expect("demo seed"))
}

fn login(provider: &DirectoryAuthProvider, identifier: &str, password: &str)
    -> Result<erp_access::identity::User, AccessError>
{
    provider.login(&LoginRequest { identifier: identifier.into(), password: password.into() })
}

#[test]
fn student_login_lands_on_student_dashboard() {
    let provider = demo_provider();
    let user = login(&provider, "202312345678", "student123").expect("student login");
    assert_eq!(user.role, Role::Student);
    assert_eq!(landing_path(Some(&user)), "/student");
}

#[test]
fn mixed_case_email_still_resolves() {
    let provider = demo_provider();
    let user = login(&provider, "FACULTY@COLLEGE.EDU", "faculty123").expect("faculty login");
    assert_eq!(user.role, Role::Faculty);
    assert_eq!(landing_path(Some(&user)), "/faculty");
}

#[test]
fn wrong_password_fails_closed() {
    let provider = demo_provider();
    let err = login(&provider, "202312345678", "wrongpass").unwrap_err();
    assert_eq!(err, AccessError::invalid_credentials());
}

#[test]
fn view_mode_is_keyed_by_viewed_role_not_session_role() {
    let provider = demo_provider();
    let hod = login(&provider, "hod.cse@college.edu", "hod123").expect("hod login");
    // The HoD's own pages are full access...
    assert_eq!(view_mode(hod.role), ViewMode::Full);
    assert_eq!(
        resolve_navigation(Some(&hod), "/hod/approvals"),
        Navigation::Allow { view_mode: ViewMode::Full }
    );
    // ...while the executive-admin listings stay view-only regardless of who
    // asks about them.
    assert_eq!(view_mode(Role::ExecutiveAdmin), ViewMode::ViewOnly);
}

#[test]
fn full_login_session_and_restart_round_trip() {
    let tmp = tempdir().unwrap();
    let provider = demo_provider();
    let user = login(&provider, "execadmin@college.edu", "exec123").expect("exec login");

    {
        let store = SessionStore::open(tmp.path());
        store.set(user.clone()).expect("persist session");
        assert_eq!(store.current(), Some(user.clone()));
    }

    // New store over the same directory: the restart edge into the
    // authenticated state, without re-running credential resolution.
    let store = SessionStore::open(tmp.path());
    let restored = store.load().expect("restored session");
    assert_eq!(restored, user);
    assert_eq!(landing_path(Some(&restored)), "/admin/executive");
    assert_eq!(
        resolve_navigation(Some(&restored), "/admin/executive/users"),
        Navigation::Allow { view_mode: ViewMode::ViewOnly }
    );

    // Logout drops back to anonymous for good.
    store.clear().expect("clear session");
    assert_eq!(store.current(), None);
    let fresh = SessionStore::open(tmp.path());
    assert_eq!(fresh.load(), None);
    assert_eq!(landing_path(None), "/login");
}

#[test]
fn anonymous_navigation_always_redirects_to_login() {
    for path in ["/student", "/hod/approvals", "/admin/super/users", "/faculty/timetable"] {
        assert_eq!(resolve_navigation(None, path), Navigation::Redirect("/login".to_string()));
    }
}

#[test]
fn route_table_is_complete_for_every_role() {
    verify_route_table().expect("route table");
    for role in Role::ALL {
        let nav = nav_items(role);
        assert!(!nav.is_empty(), "{} has no menu", role.as_str());
        assert_eq!(nav[0].label, "Dashboard", "{} menu must lead with Dashboard", role.as_str());
        assert!(notifications_path(role).ends_with("/notifications"));
    }
}
