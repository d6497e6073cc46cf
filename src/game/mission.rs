//! Mission state and the authoritative tick loop

use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{mpsc, watch};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::util::time::tick_delta;

use super::snapshot::{MissionReport, StatusSnapshot};
use super::vehicle::{MissionParameters, Outcome, VehicleState};

/// Mission lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionPhase {
    /// Entering parameters
    Setup,
    /// Launch countdown before the descent starts
    Countdown,
    /// Descent in progress, tick loop running
    Flying,
    /// Touched down at or below the safe landing speed
    Landed,
    /// Touched down above the safe landing speed
    Crashed,
    /// Aborted before touchdown; the vehicle may still read as in flight
    Interrupted,
}

/// Whether the command channel is still delivering pilot input
enum CommandFeed {
    Open,
    Closed,
}

/// The authoritative descent mission.
///
/// Owns the vehicle and is the only writer to it. Pilot commands arrive
/// over an mpsc channel and are drained once per tick boundary, so a
/// command always takes effect on the next tick after acceptance, never
/// mid-tick. The abort flag short-circuits the loop at any point.
pub struct Mission {
    id: Uuid,
    vehicle: VehicleState,
    phase: MissionPhase,
    tick: u64,
    tick_rate: Duration,
    /// Latest accepted thrust command, applied at each tick boundary
    pending_thrust: f64,
    command_rx: mpsc::Receiver<super::PilotCommand>,
    abort_rx: watch::Receiver<bool>,
    snapshot_tx: mpsc::Sender<StatusSnapshot>,
}

impl Mission {
    pub fn new(
        id: Uuid,
        params: &MissionParameters,
        tick_rate: Duration,
        command_rx: mpsc::Receiver<super::PilotCommand>,
        abort_rx: watch::Receiver<bool>,
        snapshot_tx: mpsc::Sender<StatusSnapshot>,
    ) -> Self {
        Self {
            id,
            vehicle: VehicleState::new(params),
            phase: MissionPhase::Flying,
            tick: 0,
            tick_rate,
            pending_thrust: 0.0,
            command_rx,
            abort_rx,
            snapshot_tx,
        }
    }

    /// Run the tick loop until touchdown, crash, or abort.
    ///
    /// Consumes the mission; once this returns, nothing can mutate the
    /// vehicle again, so the returned report is final by construction.
    pub async fn run(mut self) -> MissionReport {
        info!(mission_id = %self.id, "Descent underway");

        let dt = tick_delta(self.tick_rate);
        let mut ticker = interval(self.tick_rate);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The interval fires immediately; consume that so the first physics
        // step lands one full period after liftoff.
        ticker.tick().await;

        let mut abort_rx = self.abort_rx.clone();

        // An abort raised during the countdown is honored before any tick.
        if *abort_rx.borrow_and_update() {
            info!(mission_id = %self.id, "Aborted before first tick");
            self.phase = MissionPhase::Interrupted;
            return self.report();
        }

        while self.phase == MissionPhase::Flying {
            tokio::select! {
                // An abort that races a tick boundary must win: no physics
                // step may land after the interrupt.
                biased;

                changed = abort_rx.changed() => {
                    if changed.is_err() || *abort_rx.borrow() {
                        info!(mission_id = %self.id, tick = self.tick, "Mission aborted");
                        self.phase = MissionPhase::Interrupted;
                    }
                }
                _ = ticker.tick() => {
                    if let CommandFeed::Closed = self.drain_commands() {
                        warn!(mission_id = %self.id, tick = self.tick, "Command intake closed mid-flight, aborting");
                        self.phase = MissionPhase::Interrupted;
                        break;
                    }
                    self.advance(dt);
                }
            }
        }

        self.report()
    }

    /// Drain queued pilot commands, keeping only the most recent
    fn drain_commands(&mut self) -> CommandFeed {
        loop {
            match self.command_rx.try_recv() {
                Ok(cmd) => {
                    debug!(
                        mission_id = %self.id,
                        thrust = cmd.thrust,
                        received_at = cmd.received_at,
                        "Command staged"
                    );
                    self.pending_thrust = cmd.thrust;
                }
                Err(TryRecvError::Empty) => return CommandFeed::Open,
                Err(TryRecvError::Disconnected) => return CommandFeed::Closed,
            }
        }
    }

    /// Apply the pending command, step the physics, publish a snapshot
    fn advance(&mut self, dt: f64) {
        self.vehicle.set_thrust(self.pending_thrust);
        self.vehicle.tick(dt);
        self.tick += 1;

        let snapshot = StatusSnapshot::capture(self.tick, &self.vehicle);
        debug!(
            mission_id = %self.id,
            tick = self.tick,
            altitude = snapshot.altitude,
            velocity = snapshot.velocity,
            fuel = snapshot.fuel,
            thrust = snapshot.thrust_command,
            "Tick"
        );
        // Display lag never stalls the simulation.
        let _ = self.snapshot_tx.try_send(snapshot);

        match self.vehicle.outcome {
            Outcome::InFlight => {}
            Outcome::Landed => {
                info!(
                    mission_id = %self.id,
                    tick = self.tick,
                    impact_velocity = self.vehicle.impact_velocity,
                    "Touchdown"
                );
                self.phase = MissionPhase::Landed;
            }
            Outcome::Crashed => {
                info!(
                    mission_id = %self.id,
                    tick = self.tick,
                    impact_velocity = self.vehicle.impact_velocity,
                    "Impact above safe landing speed"
                );
                self.phase = MissionPhase::Crashed;
            }
        }
    }

    fn report(&self) -> MissionReport {
        MissionReport {
            mission_id: self.id,
            phase: self.phase,
            flight_time_secs: self.tick as f64 * tick_delta(self.tick_rate),
            final_status: StatusSnapshot::capture(self.tick, &self.vehicle),
            completed_at: chrono::Utc::now(),
        }
    }
}
