use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// One status per employee per calendar day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Leave,
    Holiday,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub employee_id: u64,
    pub date: NaiveDate,
    pub check_in_time: Option<NaiveDateTime>,
    pub check_out_time: Option<NaiveDateTime>,
    pub check_in_photo: Option<String>,
    pub check_out_photo: Option<String>,
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    /// Record ids are keyed by (employee, day), so a day can never hold
    /// more than one record.
    pub fn record_id(employee_id: u64, date: NaiveDate) -> String {
        format!("att-{}-{}", employee_id, date.format("%Y-%m-%d"))
    }
}
