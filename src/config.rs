use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Fixed delay added to every service call to simulate the network.
    pub mock_latency_ms: u64,

    /// Base seed for the attendance generator. Month data is derived from
    /// this, so two reads of the same month always agree.
    pub rng_seed: u64,

    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            mock_latency_ms: env::var("MOCK_LATENCY_MS")
                .unwrap_or_else(|_| "150".to_string())
                .parse()
                .unwrap_or(150),

            rng_seed: env::var("RNG_SEED")
                .unwrap_or_else(|_| "42".to_string())
                .parse()
                .unwrap_or(42),

            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        }
    }

    /// Zero-latency config used by the test suites.
    pub fn for_tests() -> Self {
        Self {
            mock_latency_ms: 0,
            rng_seed: 42,
            log_dir: "logs".to_string(),
        }
    }
}
