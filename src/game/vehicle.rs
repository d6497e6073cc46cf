//! Vehicle physics and termination outcomes

use serde::{Deserialize, Serialize};

/// Lunar surface gravity (m/s²)
pub const GRAVITY: f64 = 1.625;
/// Acceleration per thrust percentage point (m/s² per point)
pub const THRUST_POWER: f64 = 0.15;
/// Fuel burn per thrust percentage point per second (kg)
pub const FUEL_RATE: f64 = 0.1;

/// Immutable descent parameters, fixed once a mission starts
#[derive(Debug, Clone, Copy)]
pub struct MissionParameters {
    /// Starting altitude above the surface (m, >= 0)
    pub initial_altitude: f64,
    /// Starting velocity (m/s, downward-positive; negative means ascending)
    pub initial_velocity: f64,
    /// Fuel on board at entry interface (kg, >= 0)
    pub initial_fuel: f64,
    /// Maximum impact velocity that still counts as a landing (m/s, > 0)
    pub safe_landing_speed: f64,
}

impl Default for MissionParameters {
    fn default() -> Self {
        Self {
            initial_altitude: 1_000.0,
            initial_velocity: 50.0,
            initial_fuel: 1_200.0,
            safe_landing_speed: 5.0,
        }
    }
}

/// How the descent ended, if it has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Still descending (or ascending under thrust)
    InFlight,
    /// Surface contact at or below the safe landing speed
    Landed,
    /// Surface contact above the safe landing speed
    Crashed,
}

/// The single mutable vehicle entity.
///
/// Owned exclusively by the control loop; mutated only through
/// [`VehicleState::set_thrust`] and [`VehicleState::tick`]. Velocity is
/// downward-positive, so positive velocity reduces altitude.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleState {
    pub altitude: f64,
    pub velocity: f64,
    pub fuel: f64,
    /// Currently commanded throttle in [0, 100]
    pub thrust_command: f64,
    /// Latches true once fuel hits zero; forces thrust to zero from then on
    pub out_of_fuel: bool,
    pub outcome: Outcome,
    /// Downward speed at the instant altitude first reached zero
    pub impact_velocity: Option<f64>,
    safe_landing_speed: f64,
}

impl VehicleState {
    pub fn new(params: &MissionParameters) -> Self {
        debug_assert!(params.initial_altitude >= 0.0);
        debug_assert!(params.initial_fuel >= 0.0);
        debug_assert!(params.safe_landing_speed > 0.0);

        Self {
            altitude: params.initial_altitude,
            velocity: params.initial_velocity,
            fuel: params.initial_fuel,
            thrust_command: 0.0,
            out_of_fuel: params.initial_fuel <= 0.0,
            outcome: Outcome::InFlight,
            impact_velocity: None,
            safe_landing_speed: params.safe_landing_speed,
        }
    }

    /// Command a new throttle setting.
    ///
    /// Clamped into [0, 100]. Forced to zero after touchdown or once the
    /// tanks are dry. Consumes no fuel by itself.
    pub fn set_thrust(&mut self, requested: f64) {
        debug_assert!(requested.is_finite());

        if self.outcome != Outcome::InFlight || self.out_of_fuel {
            self.thrust_command = 0.0;
            return;
        }
        self.thrust_command = requested.clamp(0.0, 100.0);
    }

    /// Advance the vehicle by one physics step of `dt` seconds.
    ///
    /// A no-op once the outcome is terminal. If the engine runs dry during
    /// the step, the acceleration already computed for this step still
    /// applies; the cut takes effect from the next step. A step that carries
    /// the vehicle past the surface clamps altitude to zero and records the
    /// crossing velocity as the impact velocity; no sub-stepping is done.
    pub fn tick(&mut self, dt: f64) {
        debug_assert!(dt > 0.0);

        if self.outcome != Outcome::InFlight {
            return;
        }

        let thrust_accel = if self.fuel > 0.0 {
            let accel = self.thrust_command * THRUST_POWER;
            self.fuel -= self.thrust_command * FUEL_RATE * dt;
            if self.fuel <= 0.0 {
                self.fuel = 0.0;
                self.out_of_fuel = true;
                self.thrust_command = 0.0;
            }
            accel
        } else {
            self.out_of_fuel = true;
            self.thrust_command = 0.0;
            0.0
        };

        self.velocity += (GRAVITY - thrust_accel) * dt;
        self.altitude -= self.velocity * dt;

        if self.altitude <= 0.0 {
            self.altitude = 0.0;
            let impact = self.velocity;
            self.impact_velocity = Some(impact);
            self.outcome = if impact <= self.safe_landing_speed {
                Outcome::Landed
            } else {
                Outcome::Crashed
            };
            self.velocity = 0.0;
            self.thrust_command = 0.0;
        }

        debug_assert!(self.altitude >= 0.0);
        debug_assert!(self.fuel >= 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn params(altitude: f64, velocity: f64, fuel: f64, safe: f64) -> MissionParameters {
        MissionParameters {
            initial_altitude: altitude,
            initial_velocity: velocity,
            initial_fuel: fuel,
            safe_landing_speed: safe,
        }
    }

    #[test]
    fn thrust_is_clamped_into_commandable_range() {
        let mut vehicle = VehicleState::new(&params(1_000.0, 0.0, 500.0, 5.0));

        vehicle.set_thrust(42.5);
        assert_eq!(vehicle.thrust_command, 42.5);

        vehicle.set_thrust(150.0);
        assert_eq!(vehicle.thrust_command, 100.0);

        vehicle.set_thrust(-5.0);
        assert_eq!(vehicle.thrust_command, 0.0);
    }

    #[test]
    fn thrust_is_forced_to_zero_without_fuel() {
        let mut vehicle = VehicleState::new(&params(1_000.0, 0.0, 0.0, 5.0));
        assert!(vehicle.out_of_fuel);

        vehicle.set_thrust(80.0);
        assert_eq!(vehicle.thrust_command, 0.0);
    }

    #[test]
    fn thrust_is_forced_to_zero_after_touchdown() {
        let mut vehicle = VehicleState::new(&params(4.0, 3.375, 0.0, 5.0));
        vehicle.tick(1.0);
        assert_ne!(vehicle.outcome, Outcome::InFlight);

        vehicle.set_thrust(60.0);
        assert_eq!(vehicle.thrust_command, 0.0);
    }

    // Fuel-free coast from 10 m: gravity alone, crash on the fourth step.
    #[test]
    fn fuel_free_coast_accelerates_into_the_surface() {
        let mut vehicle = VehicleState::new(&params(10.0, 0.0, 0.0, 5.0));

        vehicle.tick(1.0);
        assert_eq!(vehicle.velocity, 1.625);
        assert_eq!(vehicle.altitude, 8.375);
        assert_eq!(vehicle.outcome, Outcome::InFlight);

        vehicle.tick(1.0);
        assert_eq!(vehicle.velocity, 3.25);
        assert_eq!(vehicle.altitude, 5.125);

        vehicle.tick(1.0);
        assert_eq!(vehicle.velocity, 4.875);
        assert_eq!(vehicle.altitude, 0.25);

        vehicle.tick(1.0);
        assert_eq!(vehicle.altitude, 0.0);
        assert_eq!(vehicle.impact_velocity, Some(6.5));
        assert_eq!(vehicle.outcome, Outcome::Crashed);
    }

    // Full throttle overcomes gravity: one step turns the descent around.
    #[test]
    fn full_thrust_climbs_away_from_the_surface() {
        let mut vehicle = VehicleState::new(&params(5.0, 0.0, 1_000.0, 5.0));
        vehicle.set_thrust(100.0);
        vehicle.tick(1.0);

        assert!((vehicle.velocity - (-13.375)).abs() < EPS);
        assert!((vehicle.altitude - 18.375).abs() < EPS);
        assert!((vehicle.fuel - 990.0).abs() < EPS);
        assert_eq!(vehicle.outcome, Outcome::InFlight);
    }

    // Impact exactly at the safe landing speed counts as landed.
    #[test]
    fn landing_boundary_is_inclusive() {
        let mut vehicle = VehicleState::new(&params(4.0, 3.375, 0.0, 5.0));
        vehicle.tick(1.0);

        assert_eq!(vehicle.impact_velocity, Some(5.0));
        assert_eq!(vehicle.outcome, Outcome::Landed);
        assert_eq!(vehicle.altitude, 0.0);
        assert_eq!(vehicle.velocity, 0.0);
    }

    #[test]
    fn impact_just_above_the_boundary_is_a_crash() {
        let mut vehicle = VehicleState::new(&params(4.0, 3.5, 0.0, 5.0));
        vehicle.tick(1.0);

        assert_eq!(vehicle.impact_velocity, Some(5.125));
        assert_eq!(vehicle.outcome, Outcome::Crashed);
    }

    #[test]
    fn engine_cut_still_applies_this_steps_acceleration() {
        // 100% thrust burns 10 kg/s; 5 kg runs dry mid-step.
        let mut vehicle = VehicleState::new(&params(1_000.0, 0.0, 5.0, 5.0));
        vehicle.set_thrust(100.0);
        vehicle.tick(1.0);

        assert_eq!(vehicle.fuel, 0.0);
        assert!(vehicle.out_of_fuel);
        assert_eq!(vehicle.thrust_command, 0.0);
        // The full 15 m/s² of thrust still counted against gravity this step.
        assert!((vehicle.velocity - (-13.375)).abs() < EPS);

        // From the next step the vehicle is ballistic.
        vehicle.tick(1.0);
        assert!((vehicle.velocity - (-11.75)).abs() < EPS);
    }

    #[test]
    fn commanded_thrust_is_dropped_when_tanks_run_dry() {
        let mut vehicle = VehicleState::new(&params(1_000.0, 0.0, 5.0, 5.0));
        vehicle.set_thrust(100.0);
        vehicle.tick(1.0);
        assert!(vehicle.out_of_fuel);

        // Re-commanding thrust after the cut has no effect.
        vehicle.set_thrust(100.0);
        assert_eq!(vehicle.thrust_command, 0.0);
        vehicle.tick(1.0);
        assert_eq!(vehicle.fuel, 0.0);
    }

    #[test]
    fn fuel_is_monotonic_and_never_negative() {
        let mut vehicle = VehicleState::new(&params(10_000.0, 0.0, 30.0, 5.0));
        let mut last_fuel = vehicle.fuel;

        for step in 0..50 {
            let thrust = if step % 3 == 0 { 0.0 } else { 75.0 };
            vehicle.set_thrust(thrust);
            let commanded = vehicle.thrust_command;
            vehicle.tick(1.0);

            assert!(vehicle.fuel >= 0.0);
            if commanded > 0.0 {
                assert!(vehicle.fuel < last_fuel || vehicle.fuel == 0.0);
            } else {
                assert_eq!(vehicle.fuel, last_fuel);
            }
            last_fuel = vehicle.fuel;
        }
        assert!(vehicle.out_of_fuel);
    }

    #[test]
    fn altitude_never_goes_negative() {
        let mut vehicle = VehicleState::new(&params(50.0, 20.0, 100.0, 5.0));
        for _ in 0..100 {
            vehicle.set_thrust(30.0);
            vehicle.tick(1.0);
            assert!(vehicle.altitude >= 0.0);
        }
    }

    #[test]
    fn outcome_transitions_exactly_once() {
        let mut vehicle = VehicleState::new(&params(10.0, 0.0, 0.0, 5.0));
        let mut transitions = 0;
        let mut last = vehicle.outcome;

        for _ in 0..20 {
            vehicle.tick(1.0);
            if vehicle.outcome != last {
                assert_eq!(last, Outcome::InFlight);
                transitions += 1;
                last = vehicle.outcome;
            }
        }
        assert_eq!(transitions, 1);
        assert_eq!(vehicle.outcome, Outcome::Crashed);
    }

    #[test]
    fn ticking_past_termination_changes_nothing() {
        let mut vehicle = VehicleState::new(&params(10.0, 0.0, 0.0, 5.0));
        while vehicle.outcome == Outcome::InFlight {
            vehicle.tick(1.0);
        }

        let terminal = vehicle.clone();
        for _ in 0..10 {
            vehicle.tick(1.0);
        }
        assert_eq!(vehicle, terminal);
    }

    // A single oversized step that overshoots far below the surface still
    // clamps to zero and reports the crossing velocity.
    #[test]
    fn oversized_step_clamps_to_the_surface() {
        let mut vehicle = VehicleState::new(&params(1_000.0, 0.0, 0.0, 5.0));
        vehicle.tick(100.0);

        assert_eq!(vehicle.altitude, 0.0);
        assert_eq!(vehicle.impact_velocity, Some(162.5));
        assert_eq!(vehicle.outcome, Outcome::Crashed);
    }

    #[test]
    fn ascending_start_is_allowed() {
        let mut vehicle = VehicleState::new(&params(100.0, -10.0, 0.0, 5.0));
        vehicle.tick(1.0);

        // Still moving upward after one step of gravity.
        assert_eq!(vehicle.velocity, -8.375);
        assert_eq!(vehicle.altitude, 108.375);
        assert_eq!(vehicle.outcome, Outcome::InFlight);
    }
}
