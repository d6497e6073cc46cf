//! Simulation core modules

pub mod mission;
pub mod snapshot;
pub mod vehicle;

pub use mission::{Mission, MissionPhase};
pub use snapshot::{MissionReport, StatusSnapshot};
pub use vehicle::{MissionParameters, Outcome, VehicleState};

/// Pilot command received from the intake task
#[derive(Debug, Clone, Copy)]
pub struct PilotCommand {
    /// Validated, clamped throttle percentage
    pub thrust: f64,
    /// Unix millis at which the line was accepted
    pub received_at: u64,
}
