//! Time utilities for the simulation loop

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Get current Unix timestamp in milliseconds
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis() as u64
}

/// Default simulation tick period in milliseconds
pub const DEFAULT_TICK_RATE_MS: u64 = 1_000;

/// Physics delta time for one tick, in seconds.
///
/// The integrator always advances by the fixed nominal tick period.
/// Wall-clock jitter between interval firings never feeds the physics.
pub fn tick_delta(tick_rate: Duration) -> f64 {
    tick_rate.as_secs_f64()
}
