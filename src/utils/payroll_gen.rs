use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};

use super::attendance_gen::{days_in_month, first_of_month};
use crate::model::employee::Employee;
use crate::model::payroll::{PayrollRecord, PayrollStatus};

/// Flat deduction applied to every closed payroll month.
pub const DEDUCTION_RATE: f64 = 0.10;

/// Weekdays of the month, excluding the 1st/15th holidays.
pub fn working_days(month: NaiveDate) -> u32 {
    let first = first_of_month(month);
    (0..days_in_month(month))
        .map(|offset| first + Duration::days(offset as i64))
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .filter(|d| d.day() != 1 && d.day() != 15)
        .count() as u32
}

fn payroll_id(employee_id: u64, month: NaiveDate) -> String {
    format!("pay-{}-{}", employee_id, month.format("%Y-%m"))
}

/// Prior month is closed out and paid; the current month stays pending with
/// nothing aggregated until the period ends.
pub fn generate_payroll(employee: &Employee, today: NaiveDate) -> Vec<PayrollRecord> {
    let current = first_of_month(today);
    let prior = current - Months::new(1);

    let deductions = (employee.salary * DEDUCTION_RATE).round();
    let prior_working = working_days(prior);

    vec![
        PayrollRecord {
            id: payroll_id(employee.id, prior),
            employee_id: employee.id,
            month: prior,
            working_days: prior_working,
            present_days: prior_working.saturating_sub(1),
            leaves_taken: 1,
            base_salary: employee.salary,
            deductions,
            net_salary: employee.salary - deductions,
            status: PayrollStatus::Paid,
        },
        // Nothing is aggregated for the open period, so every money field
        // stays zero and net = base - deductions still holds.
        PayrollRecord {
            id: payroll_id(employee.id, current),
            employee_id: employee.id,
            month: current,
            working_days: working_days(current),
            present_days: 0,
            leaves_taken: 0,
            base_salary: 0.0,
            deductions: 0.0,
            net_salary: 0.0,
            status: PayrollStatus::Pending,
        },
    ]
}
