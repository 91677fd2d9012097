use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Remaining allotted days per leave type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    pub sick: u32,
    pub casual: u32,
    pub paid: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub salary: f64,
    pub joining_date: NaiveDate,
    pub leave_balance: LeaveBalance,
}
