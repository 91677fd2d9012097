use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::api::simulate_latency;
use crate::auth::auth::Session;
use crate::error::ServiceError;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveType};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLeave {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub leave_type: LeaveType,
    pub reason: String,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct LeaveFilter {
    /// Filter by employee ID
    pub employee_id: Option<u64>,
    /// Filter by leave status
    pub status: Option<LeaveStatus>,
    /// Pagination page number (start with 1)
    pub page: Option<u64>,
    /// Pagination per page number
    pub per_page: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRequest>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

/* =========================
Create leave request
========================= */
pub async fn create_leave(
    state: &AppState,
    session: &Session,
    payload: CreateLeave,
) -> Result<LeaveRequest, ServiceError> {
    let employee_id = session.require_employee()?;
    simulate_latency(&state.config).await;

    // 1️⃣ validate dates
    if payload.start_date > payload.end_date {
        return Err(ServiceError::validation("start_date cannot be after end_date"));
    }

    // 2️⃣ a reason is required
    if payload.reason.trim().is_empty() {
        return Err(ServiceError::validation("a reason is required"));
    }

    let employee = state
        .db
        .employee(employee_id)
        .ok_or_else(|| ServiceError::not_found("employee", employee_id))?;

    // 3️⃣ enough balance for the requested days (unpaid has no counter)
    let days = (payload.end_date - payload.start_date).num_days() as u32 + 1;
    let available = match payload.leave_type {
        LeaveType::Sick => Some(employee.leave_balance.sick),
        LeaveType::Casual => Some(employee.leave_balance.casual),
        LeaveType::Paid => Some(employee.leave_balance.paid),
        LeaveType::Unpaid => None,
    };
    if let Some(available) = available {
        if days > available {
            return Err(ServiceError::validation(format!(
                "insufficient {} leave balance: requested {}, available {}",
                payload.leave_type, days, available
            )));
        }
    }

    // 4️⃣ no overlap with already approved leave
    if state
        .db
        .has_approved_overlap(employee_id, payload.start_date, payload.end_date)
    {
        return Err(ServiceError::validation(
            "the range overlaps an approved leave",
        ));
    }

    let request = LeaveRequest {
        id: Uuid::new_v4().to_string(),
        employee_id,
        start_date: payload.start_date,
        end_date: payload.end_date,
        leave_type: payload.leave_type,
        reason: payload.reason.trim().to_string(),
        status: LeaveStatus::Pending,
        created_at: state.today(),
    };
    state.db.insert_leave_request(request.clone());

    info!(employee_id, leave_id = %request.id, "Leave request submitted");
    Ok(request)
}

/// Requests on file for one employee, newest first.
pub async fn get_leave_requests(
    state: &AppState,
    session: &Session,
    employee_id: u64,
) -> Result<Vec<LeaveRequest>, ServiceError> {
    session.can_access(employee_id)?;
    simulate_latency(&state.config).await;

    state
        .db
        .employee(employee_id)
        .ok_or_else(|| ServiceError::not_found("employee", employee_id))?;

    Ok(state.db.leave_requests_for(employee_id))
}

/* =========================
Approve leave (Admin)
========================= */
pub async fn approve_leave(
    state: &AppState,
    session: &Session,
    leave_id: &str,
) -> Result<LeaveRequest, ServiceError> {
    session.require_admin()?;
    simulate_latency(&state.config).await;

    let request = state.db.approve_leave(leave_id).map_err(|e| {
        tracing::error!(error = %e, leave_id, "Approve leave failed");
        e
    })?;

    info!(leave_id, employee_id = request.employee_id, "Leave approved");
    Ok(request)
}

/* =========================
Reject leave (Admin)
========================= */
pub async fn reject_leave(
    state: &AppState,
    session: &Session,
    leave_id: &str,
) -> Result<LeaveRequest, ServiceError> {
    session.require_admin()?;
    simulate_latency(&state.config).await;

    let request = state.db.reject_leave(leave_id).map_err(|e| {
        tracing::error!(error = %e, leave_id, "Reject leave failed");
        e
    })?;

    info!(leave_id, employee_id = request.employee_id, "Leave rejected");
    Ok(request)
}

/// Paginated listing across employees (the admin leave screen).
pub async fn leave_list(
    state: &AppState,
    session: &Session,
    filter: &LeaveFilter,
) -> Result<LeaveListResponse, ServiceError> {
    session.require_admin()?;
    simulate_latency(&state.config).await;

    let per_page = filter.per_page.unwrap_or(10).min(100);
    let page = filter.page.unwrap_or(1).max(1);
    let offset = ((page - 1) * per_page) as usize;

    let requests: Vec<_> = state
        .db
        .all_leave_requests()
        .into_iter()
        .filter(|r| filter.employee_id.map_or(true, |id| r.employee_id == id))
        .filter(|r| filter.status.map_or(true, |s| r.status == s))
        .collect();

    let total = requests.len() as i64;
    let data = requests
        .into_iter()
        .skip(offset)
        .take(per_page as usize)
        .collect();

    Ok(LeaveListResponse {
        data,
        page: page as u32,
        per_page: per_page as u32,
        total,
    })
}
