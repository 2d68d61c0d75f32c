pub const DEFAULT_NATS_URL: &str = "nats://localhost:4222";
pub const DEFAULT_PREDICTOR_URL: &str = "http://localhost:8000";
pub const DEFAULT_PREDICTOR_TIMEOUT_SECS: u64 = 5;

/// Urban approach band in km/h
pub const DEFAULT_SPEED_MIN_KMH: f64 = 10.0;
pub const DEFAULT_SPEED_MAX_KMH: f64 = 60.0;
