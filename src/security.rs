//! Credential storage and password verification.
//! Passwords are stored as Argon2 PHC strings; the demo seed mirrors the
//! accounts the college system ships with.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};

use crate::error::{AccessError, AccessResult};
use crate::identity::{Role, User};

pub fn hash_password(password: &str) -> Result<String> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| anyhow!(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| anyhow!(e.to_string()))?;
    let argon2 = Argon2::default();
    let phc = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!(e.to_string()))?
        .to_string();
    Ok(phc)
}

pub fn verify_password(hash: &str, password: &str) -> bool {
    if let Ok(parsed) = PasswordHash::new(hash) {
        let argon2 = Argon2::default();
        argon2.verify_password(password.as_bytes(), &parsed).is_ok()
    } else {
        false
    }
}

/// One user plus their password hash. One-to-one with `User`.
#[derive(Debug, Clone)]
pub struct Credential {
    pub user: User,
    pub password_hash: String,
}

/// In-memory credential table keyed by normalized (lower-cased) identifier.
/// Seeded once at startup; lookups are read-only afterwards, so the table is
/// safe to share across any number of concurrent resolver calls.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    users: HashMap<String, Credential>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user, enforcing the identifier/role invariant and identifier
    /// uniqueness (case-insensitive for emails).
    pub fn add_user(&mut self, user: User, password: &str) -> AccessResult<()> {
        user.validate()?;
        let key = user.login_key().to_lowercase();
        if self.users.contains_key(&key) {
            return Err(AccessError::config(format!("duplicate identifier '{key}'")));
        }
        let password_hash = hash_password(password)
            .map_err(|e| AccessError::config(format!("could not hash password for '{key}': {e}")))?;
        self.users.insert(key, Credential { user, password_hash });
        Ok(())
    }

    /// Lookup by an already-normalized identifier.
    pub fn lookup(&self, normalized_identifier: &str) -> Option<&Credential> {
        self.users.get(normalized_identifier)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Demo accounts from the college system: one student, one faculty,
    /// two HoDs and the three admins.
    pub fn seed_demo() -> AccessResult<Self> {
        let mut dir = Directory::new();
        dir.add_user(
            User {
                id: "1".into(),
                name: "Rahul Kumar".into(),
                role: Role::Student,
                student_id: Some("202312345678".into()),
                email: None,
                department: Some("Computer Science".into()),
            },
            "student123",
        )?;
        dir.add_user(
            User {
                id: "2".into(),
                name: "Dr. Priya Sharma".into(),
                role: Role::Faculty,
                student_id: None,
                email: Some("faculty@college.edu".into()),
                department: Some("Computer Science".into()),
            },
            "faculty123",
        )?;
        dir.add_user(
            User {
                id: "3".into(),
                name: "Dr. Anil Kumar".into(),
                role: Role::Hod,
                student_id: None,
                email: Some("hod.cse@college.edu".into()),
                department: Some("Computer Science".into()),
            },
            "hod123",
        )?;
        dir.add_user(
            User {
                id: "4".into(),
                name: "Dr. Meena Patel".into(),
                role: Role::Hod,
                student_id: None,
                email: Some("hod.ece@college.edu".into()),
                department: Some("Electronics & Communication".into()),
            },
            "hod123",
        )?;
        dir.add_user(
            User {
                id: "5".into(),
                name: "Admin User".into(),
                role: Role::SuperAdmin,
                student_id: None,
                email: Some("superadmin@college.edu".into()),
                department: None,
            },
            "super123",
        )?;
        dir.add_user(
            User {
                id: "6".into(),
                name: "Executive Admin".into(),
                role: Role::ExecutiveAdmin,
                student_id: None,
                email: Some("execadmin@college.edu".into()),
                department: None,
            },
            "exec123",
        )?;
        dir.add_user(
            User {
                id: "7".into(),
                name: "Academic Admin".into(),
                role: Role::AcademicAdmin,
                student_id: None,
                email: Some("academicadmin@college.edu".into()),
                department: None,
            },
            "academic123",
        )?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let phc = hash_password("s3cr3t!").unwrap();
        assert!(phc.starts_with("$argon2"));
        assert!(verify_password(&phc, "s3cr3t!"));
        assert!(!verify_password(&phc, "wrong"));
    }

    #[test]
    fn verify_rejects_garbage_hash() {
        assert!(!verify_password("not-a-phc-string", "anything"));
    }

    #[test]
    fn directory_keys_are_lowercased() {
        let mut dir = Directory::new();
        dir.add_user(
            User {
                id: "9".into(),
                name: "Dr. Test".into(),
                role: Role::Faculty,
                student_id: None,
                email: Some("Mixed.Case@College.Edu".into()),
                department: Some("Mathematics".into()),
            },
            "pw",
        )
        .unwrap();
        assert!(dir.lookup("mixed.case@college.edu").is_some());
        assert!(dir.lookup("Mixed.Case@College.Edu").is_none());
    }

    #[test]
    fn duplicate_identifier_is_rejected() {
        let mut dir = Directory::new();
        let user = |id: &str| User {
            id: id.into(),
            name: "Dr. Dup".into(),
            role: Role::Faculty,
            student_id: None,
            email: Some("dup@college.edu".into()),
            department: None,
        };
        dir.add_user(user("a"), "pw").unwrap();
        let err = dir.add_user(user("b"), "pw").unwrap_err();
        assert_eq!(err.code_str(), "config_error");
    }

    #[test]
    fn invalid_user_never_enters_directory() {
        let mut dir = Directory::new();
        // Student with a malformed id violates the seed invariant.
        let bad = User {
            id: "x".into(),
            name: "Bad".into(),
            role: Role::Student,
            student_id: Some("123".into()),
            email: None,
            department: None,
        };
        assert!(dir.add_user(bad, "pw").is_err());
        assert!(dir.is_empty());
    }

    #[test]
    fn demo_seed_holds_seven_accounts() {
        let dir = Directory::seed_demo().unwrap();
        assert_eq!(dir.len(), 7);
        assert!(dir.lookup("202312345678").is_some());
        assert!(dir.lookup("hod.ece@college.edu").is_some());
    }
}
