use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::model::role::Role;

/// Explicit session value returned by `login` and passed to every service
/// call. Replaces the original app's global auth state; callers may persist
/// it (it serializes) but the services never store it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: u64,
    pub name: String,
    pub email: String,
    pub role: Role,

    /// Present only if this user is linked to an employee record
    pub employee_id: Option<u64>,
}

impl Session {
    pub fn require_admin(&self) -> Result<(), ServiceError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(ServiceError::forbidden("admin only"))
        }
    }

    /// The employee this session acts as, for employee-initiated actions.
    pub fn require_employee(&self) -> Result<u64, ServiceError> {
        self.employee_id
            .ok_or_else(|| ServiceError::forbidden("no employee profile"))
    }

    /// Admins can read anyone; employees only their own records.
    pub fn can_access(&self, employee_id: u64) -> Result<(), ServiceError> {
        if self.role == Role::Admin || self.employee_id == Some(employee_id) {
            Ok(())
        } else {
            Err(ServiceError::forbidden("not your record"))
        }
    }

    pub fn is_employee(&self) -> bool {
        self.role == Role::Employee
    }
}
