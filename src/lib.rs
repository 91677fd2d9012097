//! SalaryBox mock data services: the in-process layer the UI pages call.
//! Attendance, leave and payroll data is generated on read from a seeded
//! store; only check-in/check-out marks, leave requests and leave balances
//! are stateful.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod models;
pub mod utils;

use chrono::{NaiveDate, NaiveDateTime, Utc};

use config::Config;
use db::MockDb;

fn wall_clock() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Shared state handed to every service call: the mock store, runtime
/// config, and the injected clock.
pub struct AppState {
    pub db: MockDb,
    pub config: Config,
    now: fn() -> NaiveDateTime,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, wall_clock)
    }

    /// A fixed clock keeps generation reproducible in tests.
    pub fn with_clock(config: Config, now: fn() -> NaiveDateTime) -> Self {
        let db = MockDb::seeded(now().date());
        Self { db, config, now }
    }

    pub fn now(&self) -> NaiveDateTime {
        (self.now)()
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }
}
