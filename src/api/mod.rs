use std::time::Duration;

use crate::config::Config;

pub mod attendance;
pub mod employee;
pub mod leave_request;
pub mod payroll;

/// Fixed artificial delay in front of every operation, standing in for the
/// network round-trip a real backend would cost.
pub(crate) async fn simulate_latency(config: &Config) {
    if config.mock_latency_ms > 0 {
        tokio::time::sleep(Duration::from_millis(config.mock_latency_ms)).await;
    }
}
