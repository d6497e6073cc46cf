//! Read-only status snapshots and the final mission report

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::mission::MissionPhase;
use super::vehicle::{Outcome, VehicleState};

/// Point-in-time view of the vehicle.
///
/// Safe to hold and read at any moment, including after termination; the
/// display layer only ever sees these, never the live state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSnapshot {
    /// Ticks completed since the descent began
    pub tick: u64,
    pub altitude: f64,
    pub velocity: f64,
    pub fuel: f64,
    pub thrust_command: f64,
    pub out_of_fuel: bool,
    pub outcome: Outcome,
    pub impact_velocity: Option<f64>,
}

impl StatusSnapshot {
    pub fn capture(tick: u64, vehicle: &VehicleState) -> Self {
        Self {
            tick,
            altitude: vehicle.altitude,
            velocity: vehicle.velocity,
            fuel: vehicle.fuel,
            thrust_command: vehicle.thrust_command,
            out_of_fuel: vehicle.out_of_fuel,
            outcome: vehicle.outcome,
            impact_velocity: vehicle.impact_velocity,
        }
    }
}

/// Terminal summary produced once the control loop stops
#[derive(Debug, Clone, Serialize)]
pub struct MissionReport {
    pub mission_id: Uuid,
    pub phase: MissionPhase,
    /// Simulated flight time in seconds (ticks times the nominal step)
    pub flight_time_secs: f64,
    pub final_status: StatusSnapshot,
    pub completed_at: DateTime<Utc>,
}
