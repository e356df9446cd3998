/// Reader defaults
pub const DEFAULT_DELIMITER: u8 = b',';
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Configuration
pub const ENV_PREFIX: &str = "STATION_STATS";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Progress spinner refresh interval
pub const PROGRESS_TICK_MS: u64 = 100;
