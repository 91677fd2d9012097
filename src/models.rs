use crate::model::role::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Hardcoded credential record. There is no user table; the whole "user
/// database" is the static list in `auth::handlers`.
#[derive(Debug, Clone)]
pub struct MockUser {
    pub id: u64,
    pub email: &'static str,
    pub password: &'static str,
    pub name: &'static str,
    pub role: Role,
    /// Present only if this user is linked to an employee record
    pub employee_id: Option<u64>,
}
