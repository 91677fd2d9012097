use crate::AppState;
use crate::api::simulate_latency;
use crate::auth::auth::Session;
use crate::error::ServiceError;
use crate::model::employee::Employee;

/// Full employee directory (the admin employees screen).
pub async fn get_employees(
    state: &AppState,
    session: &Session,
) -> Result<Vec<Employee>, ServiceError> {
    session.require_admin()?;
    simulate_latency(&state.config).await;

    Ok(state.db.employees())
}

/// Single employee profile; employees can only fetch their own.
pub async fn get_employee(
    state: &AppState,
    session: &Session,
    employee_id: u64,
) -> Result<Employee, ServiceError> {
    session.can_access(employee_id)?;
    simulate_latency(&state.config).await;

    state
        .db
        .employee(employee_id)
        .ok_or_else(|| ServiceError::not_found("employee", employee_id))
}
