use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::info;

use crate::AppState;
use crate::api::simulate_latency;
use crate::auth::auth::Session;
use crate::error::ServiceError;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::utils::attendance_gen::{generate_month, month_seed};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AttendanceAction {
    CheckIn,
    CheckOut,
}

/// Dashboard counts over one month of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceSummary {
    pub present: u32,
    pub absent: u32,
    pub leave: u32,
    pub holiday: u32,
}

/// One record per day of the month containing `month`, ascending, with any
/// stored check-in/check-out marks overlaid on the generated data.
pub async fn get_attendance(
    state: &AppState,
    session: &Session,
    employee_id: u64,
    month: NaiveDate,
) -> Result<Vec<AttendanceRecord>, ServiceError> {
    session.can_access(employee_id)?;
    simulate_latency(&state.config).await;

    state
        .db
        .employee(employee_id)
        .ok_or_else(|| ServiceError::not_found("employee", employee_id))?;

    let seed = month_seed(state.config.rng_seed, employee_id, month);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records = generate_month(employee_id, month, state.now(), &mut rng);

    // Stored marks win over generated data.
    for record in &mut records {
        if let Some(mark) = state.db.mark(employee_id, record.date) {
            *record = mark;
        }
    }

    Ok(records)
}

/// Check-in or check-out for the session's employee, merged into the single
/// record for (employee, today).
pub async fn mark_attendance(
    state: &AppState,
    session: &Session,
    action: AttendanceAction,
    photo: &str,
) -> Result<AttendanceRecord, ServiceError> {
    let employee_id = session.require_employee()?;
    simulate_latency(&state.config).await;

    let record = state
        .db
        .apply_mark(employee_id, state.now(), action, photo)
        .map_err(|e| {
            tracing::error!(error = %e, employee_id, "Attendance action failed");
            e
        })?;

    info!(employee_id, %action, date = %record.date, "Attendance marked");
    Ok(record)
}

/// One record per employee for the given date (the admin attendance screen).
pub async fn attendance_list(
    state: &AppState,
    session: &Session,
    date: NaiveDate,
) -> Result<Vec<AttendanceRecord>, ServiceError> {
    session.require_admin()?;
    simulate_latency(&state.config).await;

    let now = state.now();
    let records = state
        .db
        .employees()
        .iter()
        .map(|employee| {
            state.db.mark(employee.id, date).unwrap_or_else(|| {
                let seed = month_seed(state.config.rng_seed, employee.id, date);
                let mut rng = StdRng::seed_from_u64(seed);
                generate_month(employee.id, date, now, &mut rng)
                    .into_iter()
                    .find(|r| r.date == date)
                    .expect("the generated month contains every day of that month")
            })
        })
        .collect();

    Ok(records)
}

/// Pure helper the dashboard cards use; no latency, no session.
pub fn monthly_summary(records: &[AttendanceRecord]) -> AttendanceSummary {
    let mut summary = AttendanceSummary::default();
    for record in records {
        match record.status {
            AttendanceStatus::Present => summary.present += 1,
            AttendanceStatus::Absent => summary.absent += 1,
            AttendanceStatus::Leave => summary.leave += 1,
            AttendanceStatus::Holiday => summary.holiday += 1,
        }
    }
    summary
}
