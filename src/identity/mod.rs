//! Identity and access resolution: credential login, the persisted session
//! slot and role-based route authorization. Public surface stays thin; the
//! implementation is split across sub-modules.

mod authorizer;
mod principal;
mod provider;
mod session;

pub use authorizer::{
    base_path, landing_path, nav_items, nav_paths, notifications_path, resolve_navigation,
    route_entry, verify_route_table, view_mode, NavItem, Navigation, RoleRouteEntry, ViewMode,
    LOGIN_PATH,
};
pub use principal::{is_student_identifier, Role, User};
pub use provider::{CredentialProvider, DirectoryAuthProvider, LoginRequest};
pub use session::{SessionStore, SESSION_KEY};
