use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AccessError, AccessResult};

/// Closed set of roles. Everything downstream (routes, menus, view mode)
/// is keyed off this enum, so adding a role means extending the route table
/// and `verify_route_table` will catch a partial job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Faculty,
    Hod,
    SuperAdmin,
    ExecutiveAdmin,
    AcademicAdmin,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Student,
        Role::Faculty,
        Role::Hod,
        Role::SuperAdmin,
        Role::ExecutiveAdmin,
        Role::AcademicAdmin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
            Role::Hod => "hod",
            Role::SuperAdmin => "super_admin",
            Role::ExecutiveAdmin => "executive_admin",
            Role::AcademicAdmin => "academic_admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::ExecutiveAdmin | Role::AcademicAdmin)
    }
}

static STUDENT_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{12}$").unwrap());

/// Identifier classification: 12 digits selects the student-ID login path,
/// everything else is treated as an email (no stricter email validation;
/// addresses like `hod.cse@college.edu` must pass).
pub fn is_student_identifier(identifier: &str) -> bool {
    STUDENT_ID_RE.is_match(identifier)
}

/// Identity record. Seeded once into the credential directory and never
/// mutated; role or identifier reassignment is not supported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl User {
    /// The identifier this user logs in with: a student's 12-digit ID or
    /// every other role's email.
    pub fn login_key(&self) -> &str {
        match self.role {
            Role::Student => self.student_id.as_deref().unwrap_or_default(),
            _ => self.email.as_deref().unwrap_or_default(),
        }
    }

    /// Identifier/role invariant: students carry a 12-digit ID and no email,
    /// all other roles carry an email and no student ID, and the three admin
    /// roles have no department.
    pub fn validate(&self) -> AccessResult<()> {
        if self.name.trim().is_empty() {
            return Err(AccessError::config(format!("user {} has an empty name", self.id)));
        }
        match self.role {
            Role::Student => {
                let sid = self.student_id.as_deref().unwrap_or_default();
                if !is_student_identifier(sid) {
                    return Err(AccessError::config(format!(
                        "student {} must have a 12-digit student id",
                        self.id
                    )));
                }
                if self.email.is_some() {
                    return Err(AccessError::config(format!(
                        "student {} must not carry an email",
                        self.id
                    )));
                }
            }
            _ => {
                if self.email.as_deref().unwrap_or_default().is_empty() {
                    return Err(AccessError::config(format!(
                        "{} {} must have an email",
                        self.role.as_str(),
                        self.id
                    )));
                }
                if self.student_id.is_some() {
                    return Err(AccessError::config(format!(
                        "{} {} must not carry a student id",
                        self.role.as_str(),
                        self.id
                    )));
                }
                if self.role.is_admin() && self.department.is_some() {
                    return Err(AccessError::config(format!(
                        "admin {} must not carry a department",
                        self.id
                    )));
                }
            }
        }
        Ok(())
    }
}
