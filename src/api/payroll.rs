use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::api::simulate_latency;
use crate::auth::auth::Session;
use crate::error::ServiceError;
use crate::model::payroll::PayrollRecord;
use crate::utils::payroll_gen::generate_payroll;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct PayrollQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub employee_id: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct PaginatedPayrollResponse {
    pub data: Vec<PayrollRecord>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

/// Prior month (closed, paid) and current month (pending) for one employee.
pub async fn get_payroll(
    state: &AppState,
    session: &Session,
    employee_id: u64,
) -> Result<Vec<PayrollRecord>, ServiceError> {
    session.can_access(employee_id)?;
    simulate_latency(&state.config).await;

    let employee = state
        .db
        .employee(employee_id)
        .ok_or_else(|| ServiceError::not_found("employee", employee_id))?;

    Ok(generate_payroll(&employee, state.today()))
}

/// Paginated payroll across employees, newest month first (the admin
/// payroll screen).
pub async fn payroll_list(
    state: &AppState,
    session: &Session,
    query: &PayrollQuery,
) -> Result<PaginatedPayrollResponse, ServiceError> {
    session.require_admin()?;
    simulate_latency(&state.config).await;

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
    let offset = ((page - 1) * per_page) as usize;

    let today = state.today();
    let mut records: Vec<_> = state
        .db
        .employees()
        .iter()
        .filter(|e| query.employee_id.map_or(true, |id| e.id == id))
        .flat_map(|e| generate_payroll(e, today))
        .collect();
    records.sort_by(|a, b| b.month.cmp(&a.month));

    let total = records.len() as i64;
    let data = records
        .into_iter()
        .skip(offset)
        .take(per_page as usize)
        .collect();

    Ok(PaginatedPayrollResponse {
        data,
        page,
        per_page,
        total,
    })
}
