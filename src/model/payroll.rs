use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Forward-only: pending -> processed -> paid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PayrollStatus {
    Pending,
    Processed,
    Paid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    pub id: String,
    pub employee_id: u64,
    /// First day of the payroll month.
    pub month: NaiveDate,
    pub working_days: u32,
    pub present_days: u32,
    pub leaves_taken: u32,
    pub base_salary: f64,
    pub deductions: f64,
    pub net_salary: f64,
    pub status: PayrollStatus,
}
