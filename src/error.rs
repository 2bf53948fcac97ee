//! Unified error model for the access core.
//! One enum shared by the resolver, session store and authorizer, with a
//! mapping to the wording the presentation layer shows users.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccessError {
    /// Identifier unknown or password mismatch. Deliberately undifferentiated
    /// so the error never reveals whether an account exists.
    InvalidCredentials { message: String },
    /// Identifier format does not match the resolved account's role.
    RoleMismatch { message: String },
    /// Session record could not be written or removed; the in-memory session
    /// stays valid for the rest of the process.
    SessionPersistence { message: String },
    /// Route table inconsistency. Programmer error, caught at startup.
    Config { message: String },
}

impl AccessError {
    pub fn invalid_credentials() -> Self {
        AccessError::InvalidCredentials { message: "Invalid credentials".into() }
    }
    pub fn role_mismatch<S: Into<String>>(msg: S) -> Self {
        AccessError::RoleMismatch { message: msg.into() }
    }
    pub fn session<S: Into<String>>(msg: S) -> Self {
        AccessError::SessionPersistence { message: msg.into() }
    }
    pub fn config<S: Into<String>>(msg: S) -> Self {
        AccessError::Config { message: msg.into() }
    }

    pub fn code_str(&self) -> &'static str {
        match self {
            AccessError::InvalidCredentials { .. } => "invalid_credentials",
            AccessError::RoleMismatch { .. } => "role_mismatch",
            AccessError::SessionPersistence { .. } => "session_persistence",
            AccessError::Config { .. } => "config_error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AccessError::InvalidCredentials { message }
            | AccessError::RoleMismatch { message }
            | AccessError::SessionPersistence { message }
            | AccessError::Config { message } => message.as_str(),
        }
    }

    /// Wording for the login form / toast layer.
    pub fn user_message(&self) -> &str {
        match self {
            AccessError::InvalidCredentials { message } | AccessError::RoleMismatch { message } => {
                message.as_str()
            }
            AccessError::SessionPersistence { .. } => {
                "Your session could not be saved and will last only until this app closes"
            }
            AccessError::Config { .. } => "Internal configuration error",
        }
    }

    /// Config errors mean the route tables are wrong; nothing downstream can
    /// be trusted, so callers should abort rather than continue.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AccessError::Config { .. })
    }
}

impl Display for AccessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code_str(), self.message())
    }
}

impl std::error::Error for AccessError {}

pub type AccessResult<T> = Result<T, AccessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_mapping() {
        assert_eq!(AccessError::invalid_credentials().code_str(), "invalid_credentials");
        assert_eq!(AccessError::role_mismatch("Invalid student ID").code_str(), "role_mismatch");
        assert_eq!(AccessError::session("disk full").code_str(), "session_persistence");
        assert_eq!(AccessError::config("missing entry").code_str(), "config_error");
    }

    #[test]
    fn user_message_never_leaks_account_existence() {
        // Unknown identifier and wrong password read identically to the user.
        assert_eq!(AccessError::invalid_credentials().user_message(), "Invalid credentials");
    }

    #[test]
    fn only_config_is_fatal() {
        assert!(AccessError::config("bad table").is_fatal());
        assert!(!AccessError::invalid_credentials().is_fatal());
        assert!(!AccessError::session("io").is_fatal());
    }

    #[test]
    fn serializes_with_type_tag() {
        let v = serde_json::to_value(AccessError::role_mismatch("Invalid student ID")).unwrap();
        assert_eq!(v["type"], "role_mismatch");
        assert_eq!(v["message"], "Invalid student ID");
    }
}
