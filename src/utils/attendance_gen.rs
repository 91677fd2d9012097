use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use rand::Rng;
use rand::rngs::StdRng;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};

pub const PLACEHOLDER_PHOTO: &str = "/placeholder.svg";

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("every month has a day 1")
}

pub fn days_in_month(month: NaiveDate) -> u32 {
    let first = first_of_month(month);
    ((first + Months::new(1)) - first).num_days() as u32
}

/// Seed for one (employee, month) slice of generated data. Derived from the
/// configured base seed so repeated reads of the same month agree.
pub fn month_seed(base: u64, employee_id: u64, month: NaiveDate) -> u64 {
    let ym = (month.year() as u64).wrapping_mul(100) + month.month() as u64;
    base ^ employee_id.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ ym
}

/// One record per calendar day of the month containing `month`, ascending.
///
/// Status rules, in priority order: 1st/15th are holidays, weekends are
/// absent, days not yet in the past are absent, and past weekdays draw
/// present/absent/leave from the supplied generator.
pub fn generate_month(
    employee_id: u64,
    month: NaiveDate,
    now: NaiveDateTime,
    rng: &mut StdRng,
) -> Vec<AttendanceRecord> {
    let first = first_of_month(month);

    (0..days_in_month(month))
        .map(|offset| day_record(employee_id, first + Duration::days(offset as i64), now, rng))
        .collect()
}

fn day_record(
    employee_id: u64,
    date: NaiveDate,
    now: NaiveDateTime,
    rng: &mut StdRng,
) -> AttendanceRecord {
    let is_holiday = date.day() == 1 || date.day() == 15;
    let is_weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
    // A day counts as past once "now" has moved beyond its midnight.
    let is_past = date.and_time(NaiveTime::MIN) < now;

    let mut check_in_time = None;
    let mut check_out_time = None;

    let status = if is_holiday {
        AttendanceStatus::Holiday
    } else if is_weekend {
        AttendanceStatus::Absent
    } else if !is_past {
        // Future days are not marked yet
        AttendanceStatus::Absent
    } else {
        let draw: f64 = rng.random();
        if draw > 0.9 {
            AttendanceStatus::Leave
        } else if draw > 0.8 {
            AttendanceStatus::Absent
        } else {
            let midnight = date.and_time(NaiveTime::MIN);
            check_in_time = Some(midnight + Duration::minutes(9 * 60 + rng.random_range(0..15)));
            check_out_time =
                Some(midnight + Duration::minutes(17 * 60 + 30 + rng.random_range(0..30)));
            AttendanceStatus::Present
        }
    };

    let photo = (status == AttendanceStatus::Present).then(|| PLACEHOLDER_PHOTO.to_string());

    AttendanceRecord {
        id: AttendanceRecord::record_id(employee_id, date),
        employee_id,
        date,
        check_in_time,
        check_out_time,
        check_in_photo: photo.clone(),
        check_out_photo: photo,
        status,
    }
}
