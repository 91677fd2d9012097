use anyhow::Result;
use chrono::Duration;
use dotenvy::dotenv;
use tracing::info;
use tracing_appender::rolling;

use salarybox::AppState;
use salarybox::api::attendance::{self, AttendanceAction};
use salarybox::api::leave_request::{self, CreateLeave};
use salarybox::api::{employee, payroll};
use salarybox::auth::handlers::login;
use salarybox::config::Config;
use salarybox::model::leave_request::LeaveType;
use salarybox::models::LoginRequest;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Demo starting...");

    let state = AppState::new(config);

    // The two demo accounts the UI ships with.
    let staff = login(
        &state.config,
        &LoginRequest {
            email: "employee@salarybox.com".to_string(),
            password: "employee123".to_string(),
        },
    )
    .await?;
    let admin = login(
        &state.config,
        &LoginRequest {
            email: "admin@salarybox.com".to_string(),
            password: "admin123".to_string(),
        },
    )
    .await?;

    let employee_id = staff.employee_id.expect("demo employee has a profile");

    // Morning check-in, then the dashboard loads its three panels at once.
    let checked_in = attendance::mark_attendance(
        &state,
        &staff,
        AttendanceAction::CheckIn,
        "/captures/morning.jpg",
    )
    .await?;
    println!("checked in at {:?}", checked_in.check_in_time);

    let month = state.today();
    let (records, payrolls, leaves) = futures::future::try_join3(
        attendance::get_attendance(&state, &staff, employee_id, month),
        payroll::get_payroll(&state, &staff, employee_id),
        leave_request::get_leave_requests(&state, &staff, employee_id),
    )
    .await?;

    let summary = attendance::monthly_summary(&records);
    println!("month summary: {}", serde_json::to_string(&summary)?);
    println!("payroll: {}", serde_json::to_string_pretty(&payrolls)?);
    println!("{} leave requests on file", leaves.len());

    // File a new request, then the admin processes it.
    let request = leave_request::create_leave(
        &state,
        &staff,
        CreateLeave {
            start_date: state.today() + Duration::days(10),
            end_date: state.today() + Duration::days(12),
            leave_type: LeaveType::Casual,
            reason: "Family function".to_string(),
        },
    )
    .await?;
    let approved = leave_request::approve_leave(&state, &admin, &request.id).await?;
    println!("leave {} is now {}", approved.id, approved.status);

    // Admin screens.
    let directory = employee::get_employees(&state, &admin).await?;
    let today_rows = attendance::attendance_list(&state, &admin, state.today()).await?;
    let payroll_page =
        payroll::payroll_list(&state, &admin, &payroll::PayrollQuery::default()).await?;
    println!(
        "{} employees, {} attendance rows today, {} payroll records",
        directory.len(),
        today_rows.len(),
        payroll_page.total
    );

    // Evening check-out merges into the same day's record.
    let checked_out = attendance::mark_attendance(
        &state,
        &staff,
        AttendanceAction::CheckOut,
        "/captures/evening.jpg",
    )
    .await?;
    println!(
        "checked out at {:?} (record {})",
        checked_out.check_out_time, checked_out.id
    );

    info!("Demo complete");
    Ok(())
}
