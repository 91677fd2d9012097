use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use pretty_assertions::assert_eq;

use salarybox::AppState;
use salarybox::api::attendance::{self, AttendanceAction};
use salarybox::api::leave_request::{self, CreateLeave, LeaveFilter};
use salarybox::api::{employee, payroll};
use salarybox::auth::auth::Session;
use salarybox::auth::handlers::login;
use salarybox::config::Config;
use salarybox::error::ServiceError;
use salarybox::model::attendance::AttendanceStatus;
use salarybox::model::leave_request::{LeaveStatus, LeaveType};
use salarybox::models::LoginRequest;

// Tuesday 2025-05-20, 10:00.
fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 5, 20)
        .unwrap()
        .and_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn state() -> AppState {
    AppState::with_clock(Config::for_tests(), fixed_now)
}

async fn staff_session(state: &AppState) -> Session {
    login(
        &state.config,
        &LoginRequest {
            email: "employee@salarybox.com".to_string(),
            password: "employee123".to_string(),
        },
    )
    .await
    .unwrap()
}

async fn admin_session(state: &AppState) -> Session {
    login(
        &state.config,
        &LoginRequest {
            email: "admin@salarybox.com".to_string(),
            password: "admin123".to_string(),
        },
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn month_view_applies_the_status_rules() {
    // Arrange
    let state = state();
    let session = staff_session(&state).await;

    // Act
    let records = attendance::get_attendance(&state, &session, 2, date(2025, 5, 20))
        .await
        .unwrap();

    // Assert
    assert_eq!(records.len(), 31);
    // 2025-05-01 is a Thursday; the 1st is a holiday regardless.
    assert_eq!(records[0].status, AttendanceStatus::Holiday);
    assert_eq!(records[14].status, AttendanceStatus::Holiday);
    // 2025-05-03 is a Saturday.
    assert_eq!(records[2].status, AttendanceStatus::Absent);
    // 2025-05-26 is a Monday in the future.
    assert_eq!(records[25].status, AttendanceStatus::Absent);
    assert_eq!(records[25].check_in_time, None);
}

#[tokio::test]
async fn month_view_is_stable_across_reads() {
    let state = state();
    let session = staff_session(&state).await;

    let first = attendance::get_attendance(&state, &session, 2, date(2025, 5, 1))
        .await
        .unwrap();
    let second = attendance::get_attendance(&state, &session, 2, date(2025, 5, 1))
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn employees_cannot_read_other_records() {
    let state = state();
    let session = staff_session(&state).await;

    let err = attendance::get_attendance(&state, &session, 3, date(2025, 5, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));

    let admin = admin_session(&state).await;
    let records = attendance::get_attendance(&state, &admin, 3, date(2025, 5, 1))
        .await
        .unwrap();
    assert_eq!(records.len(), 31);
}

#[tokio::test]
async fn unknown_employee_is_not_found() {
    let state = state();
    let admin = admin_session(&state).await;

    let err = attendance::get_attendance(&state, &admin, 99, date(2025, 5, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let err = employee::get_employee(&state, &admin, 99).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn check_in_then_check_out_merge_into_one_record() {
    // Arrange
    let state = state();
    let session = staff_session(&state).await;

    // Act
    let checked_in =
        attendance::mark_attendance(&state, &session, AttendanceAction::CheckIn, "photo-a")
            .await
            .unwrap();
    let checked_out =
        attendance::mark_attendance(&state, &session, AttendanceAction::CheckOut, "photo-b")
            .await
            .unwrap();

    // Assert: same record, both directions populated.
    assert_eq!(checked_out.id, checked_in.id);
    assert_eq!(checked_out.id, "att-2-2025-05-20");
    assert_eq!(checked_out.status, AttendanceStatus::Present);
    assert!(checked_out.check_in_time.is_some());
    assert!(checked_out.check_out_time.is_some());
    assert_eq!(checked_out.check_in_photo.as_deref(), Some("photo-a"));
    assert_eq!(checked_out.check_out_photo.as_deref(), Some("photo-b"));

    // The month view shows the mark, and still exactly one record per day.
    let records = attendance::get_attendance(&state, &session, 2, date(2025, 5, 20))
        .await
        .unwrap();
    let today: Vec<_> = records.iter().filter(|r| r.date == date(2025, 5, 20)).collect();
    assert_eq!(today.len(), 1);
    assert_eq!(*today[0], checked_out);
}

#[tokio::test]
async fn duplicate_actions_conflict() {
    let state = state();
    let session = staff_session(&state).await;

    attendance::mark_attendance(&state, &session, AttendanceAction::CheckIn, "photo")
        .await
        .unwrap();
    let err = attendance::mark_attendance(&state, &session, AttendanceAction::CheckIn, "photo")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));

    attendance::mark_attendance(&state, &session, AttendanceAction::CheckOut, "photo")
        .await
        .unwrap();
    let err = attendance::mark_attendance(&state, &session, AttendanceAction::CheckOut, "photo")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn check_out_without_check_in_conflicts() {
    let state = state();
    let session = staff_session(&state).await;

    let err = attendance::mark_attendance(&state, &session, AttendanceAction::CheckOut, "photo")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));

    // The failed action must not leave a phantom record behind.
    assert_eq!(state.db.mark(2, date(2025, 5, 20)), None);
}

#[tokio::test]
async fn admins_have_no_employee_profile_to_mark() {
    let state = state();
    let admin = admin_session(&state).await;

    let err = attendance::mark_attendance(&state, &admin, AttendanceAction::CheckIn, "photo")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
}

#[tokio::test]
async fn payroll_matches_the_stock_example() {
    // Employee 2 earns 50000: prior month deducts 10%, nets 45000.
    let state = state();
    let session = staff_session(&state).await;

    let records = payroll::get_payroll(&state, &session, 2).await.unwrap();
    assert_eq!(records.len(), 2);

    let prior = &records[0];
    assert_eq!(prior.month, date(2025, 4, 1));
    assert_eq!(prior.deductions, 5000.0);
    assert_eq!(prior.net_salary, 45000.0);

    for record in &records {
        assert_eq!(record.net_salary, record.base_salary - record.deductions);
    }
}

#[tokio::test]
async fn created_leave_is_pending_with_a_fresh_id() {
    // Arrange
    let state = state();
    let session = staff_session(&state).await;
    let existing: Vec<String> = leave_request::get_leave_requests(&state, &session, 2)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();

    // Act
    let request = leave_request::create_leave(
        &state,
        &session,
        CreateLeave {
            start_date: date(2025, 6, 2),
            end_date: date(2025, 6, 4),
            leave_type: LeaveType::Paid,
            reason: "Vacation".to_string(),
        },
    )
    .await
    .unwrap();

    // Assert
    assert_eq!(request.status, LeaveStatus::Pending);
    assert_eq!(request.created_at, date(2025, 5, 20));
    assert!(!request.id.is_empty());
    assert!(!existing.contains(&request.id));

    let now_on_file = leave_request::get_leave_requests(&state, &session, 2)
        .await
        .unwrap();
    assert_eq!(now_on_file.len(), existing.len() + 1);
}

#[tokio::test]
async fn leave_validation_rejects_bad_requests() {
    let state = state();
    let session = staff_session(&state).await;

    // End before start.
    let err = leave_request::create_leave(
        &state,
        &session,
        CreateLeave {
            start_date: date(2025, 6, 4),
            end_date: date(2025, 6, 2),
            leave_type: LeaveType::Casual,
            reason: "Backwards".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    // Missing reason.
    let err = leave_request::create_leave(
        &state,
        &session,
        CreateLeave {
            start_date: date(2025, 6, 2),
            end_date: date(2025, 6, 2),
            leave_type: LeaveType::Casual,
            reason: "  ".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    // Eleven sick days against a balance of ten.
    let err = leave_request::create_leave(
        &state,
        &session,
        CreateLeave {
            start_date: date(2025, 5, 21),
            end_date: date(2025, 5, 31),
            leave_type: LeaveType::Sick,
            reason: "Long illness".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    // Overlaps the seeded approved sick leave (2025-04-30 .. 2025-05-02).
    let err = leave_request::create_leave(
        &state,
        &session,
        CreateLeave {
            start_date: date(2025, 5, 2),
            end_date: date(2025, 5, 3),
            leave_type: LeaveType::Unpaid,
            reason: "Overlap".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn approval_decrements_the_matching_balance() {
    // Arrange: John's seeded pending casual request spans three days.
    let state = state();
    let session = staff_session(&state).await;
    let admin = admin_session(&state).await;

    let pending = leave_request::get_leave_requests(&state, &session, 2)
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.status == LeaveStatus::Pending)
        .unwrap();
    assert_eq!(pending.leave_type, LeaveType::Casual);

    // Act
    let approved = leave_request::approve_leave(&state, &admin, &pending.id)
        .await
        .unwrap();

    // Assert
    assert_eq!(approved.status, LeaveStatus::Approved);
    let balance = employee::get_employee(&state, &admin, 2)
        .await
        .unwrap()
        .leave_balance;
    assert_eq!(balance.casual, 7 - 3);

    // A second decision on the same request is a conflict.
    let err = leave_request::approve_leave(&state, &admin, &pending.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
    let err = leave_request::reject_leave(&state, &admin, &pending.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn rejection_leaves_the_balance_untouched() {
    let state = state();
    let admin = admin_session(&state).await;

    let pending = leave_request::get_leave_requests(&state, &admin, 3)
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.status == LeaveStatus::Pending)
        .unwrap();

    let rejected = leave_request::reject_leave(&state, &admin, &pending.id)
        .await
        .unwrap();
    assert_eq!(rejected.status, LeaveStatus::Rejected);

    let balance = employee::get_employee(&state, &admin, 3)
        .await
        .unwrap()
        .leave_balance;
    assert_eq!(balance.casual, 5);
}

#[tokio::test]
async fn leave_decisions_are_admin_only() {
    let state = state();
    let session = staff_session(&state).await;

    let pending = leave_request::get_leave_requests(&state, &session, 2)
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.status == LeaveStatus::Pending)
        .unwrap();

    let err = leave_request::approve_leave(&state, &session, &pending.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));

    let err = leave_request::leave_list(&state, &session, &LeaveFilter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
}

#[tokio::test]
async fn leave_list_filters_and_paginates() {
    // Four seeded employees with two requests each.
    let state = state();
    let admin = admin_session(&state).await;

    let all = leave_request::leave_list(&state, &admin, &LeaveFilter::default())
        .await
        .unwrap();
    assert_eq!(all.total, 8);

    let pending = leave_request::leave_list(
        &state,
        &admin,
        &LeaveFilter {
            status: Some(LeaveStatus::Pending),
            ..LeaveFilter::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(pending.total, 4);

    let johns = leave_request::leave_list(
        &state,
        &admin,
        &LeaveFilter {
            employee_id: Some(2),
            ..LeaveFilter::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(johns.total, 2);

    let page = leave_request::leave_list(
        &state,
        &admin,
        &LeaveFilter {
            per_page: Some(3),
            ..LeaveFilter::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(page.data.len(), 3);
    assert_eq!(page.total, 8);
}

#[tokio::test]
async fn payroll_list_covers_every_employee_newest_first() {
    let state = state();
    let admin = admin_session(&state).await;

    let page = payroll::payroll_list(
        &state,
        &admin,
        &payroll::PayrollQuery {
            per_page: Some(100),
            ..payroll::PayrollQuery::default()
        },
    )
    .await
    .unwrap();

    // Four employees, two months each.
    assert_eq!(page.total, 8);
    assert_eq!(page.data[0].month, date(2025, 5, 1));
    assert_eq!(page.data.last().unwrap().month, date(2025, 4, 1));

    let johns = payroll::payroll_list(
        &state,
        &admin,
        &payroll::PayrollQuery {
            employee_id: Some(2),
            ..payroll::PayrollQuery::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(johns.total, 2);
}

#[tokio::test]
async fn admin_attendance_view_has_one_row_per_employee() {
    let state = state();
    let admin = admin_session(&state).await;
    let session = staff_session(&state).await;

    // A Saturday: everyone shows absent.
    let rows = attendance::attendance_list(&state, &admin, date(2025, 5, 3))
        .await
        .unwrap();
    assert_eq!(rows.len(), 4);
    for row in &rows {
        assert_eq!(row.status, AttendanceStatus::Absent);
        assert_eq!(row.date, date(2025, 5, 3));
    }

    // Today's view picks up a stored mark.
    attendance::mark_attendance(&state, &session, AttendanceAction::CheckIn, "photo")
        .await
        .unwrap();
    let rows = attendance::attendance_list(&state, &admin, date(2025, 5, 20))
        .await
        .unwrap();
    let john = rows.iter().find(|r| r.employee_id == 2).unwrap();
    assert!(john.check_in_time.is_some());

    // And the screen itself is admin-only.
    let err = attendance::attendance_list(&state, &session, date(2025, 5, 20))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
}

#[tokio::test]
async fn directory_is_admin_only() {
    let state = state();
    let session = staff_session(&state).await;
    let admin = admin_session(&state).await;

    let err = employee::get_employees(&state, &session).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));

    let directory = employee::get_employees(&state, &admin).await.unwrap();
    assert_eq!(directory.len(), 4);

    // Employees can still load their own profile.
    let own = employee::get_employee(&state, &session, 2).await.unwrap();
    assert_eq!(own.name, "John Employee");
}
