use tracing::{debug, info};

use crate::error::{AccessError, AccessResult};
use crate::security::Directory;

use super::principal::{is_student_identifier, Role, User};

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// Seam for credential resolution so the session store and authorizer stay
/// testable against a stub directory.
pub trait CredentialProvider: Send + Sync {
    fn login(&self, req: &LoginRequest) -> AccessResult<User>;
}

/// Resolver over the in-memory credential directory. Stateless apart from
/// the read-only table; a single synchronous attempt per call, no retries
/// and no rate limiting.
pub struct DirectoryAuthProvider {
    directory: Directory,
}

impl DirectoryAuthProvider {
    pub fn new(directory: Directory) -> Self {
        Self { directory }
    }
}

impl CredentialProvider for DirectoryAuthProvider {
    fn login(&self, req: &LoginRequest) -> AccessResult<User> {
        // Emails compare case-insensitively; 12-digit IDs are unaffected.
        let key = req.identifier.to_lowercase();
        let student_login = is_student_identifier(&key);

        let Some(cred) = self.directory.lookup(&key) else {
            debug!("auth.login unknown identifier");
            return Err(AccessError::invalid_credentials());
        };
        if !crate::security::verify_password(&cred.password_hash, &req.password) {
            debug!("auth.login password mismatch user={}", cred.user.id);
            return Err(AccessError::invalid_credentials());
        }

        // Login method must match the account's role.
        if student_login && cred.user.role != Role::Student {
            return Err(AccessError::role_mismatch("Invalid student ID"));
        }
        if !student_login && cred.user.role == Role::Student {
            return Err(AccessError::role_mismatch("Students must use their 12-digit ID"));
        }

        info!("auth.login user={} role={}", cred.user.id, cred.user.role.as_str());
        Ok(cred.user.clone())
    }
}
