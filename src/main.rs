//! Lunar descent simulator
//!
//! Interactive real-time descent: a single vehicle falls under lunar
//! gravity on a fixed simulation tick while the pilot types thrust
//! settings between ticks. The mission ends on touchdown, crash, or
//! ctrl-c.
//!
//! The runtime is single-threaded by design: the tick loop and the pilot
//! intake interleave cooperatively on one thread, so the vehicle state
//! never needs a lock.

mod config;
mod display;
mod game;
mod input;
mod setup;
mod util;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use crate::config::Config;
use crate::game::{Mission, MissionPhase};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    let mission_id = Uuid::new_v4();
    info!(
        mission_id = %mission_id,
        tick_rate_ms = config.tick_rate_ms,
        "Descent simulator starting"
    );

    // One reader owns stdin for the whole run: setup first, then the
    // pilot intake task takes it over for the flight.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    display::banner();
    info!(mission_id = %mission_id, phase = ?MissionPhase::Setup, "Entering setup");
    let params = setup::mission_parameters(&mut lines).await?;
    display::mission_summary(&params);
    info!(
        mission_id = %mission_id,
        altitude = params.initial_altitude,
        velocity = params.initial_velocity,
        fuel = params.initial_fuel,
        safe_landing_speed = params.safe_landing_speed,
        "Parameters locked"
    );

    // Abort flag shared by every task, tripped once by ctrl-c.
    let (abort_tx, abort_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = abort_tx.send(true);
        }
    });

    info!(mission_id = %mission_id, phase = ?MissionPhase::Countdown, "Countdown");
    display::countdown(config.countdown_secs).await;

    let (command_tx, command_rx) = mpsc::channel(16);
    let (snapshot_tx, snapshot_rx) = mpsc::channel(64);

    let input_task = tokio::spawn(input::pilot_command_task(
        lines,
        command_tx,
        abort_rx.clone(),
    ));
    let display_task = tokio::spawn(display::status_feed(snapshot_rx));

    let mission = Mission::new(
        mission_id,
        &params,
        config.tick_rate(),
        command_rx,
        abort_rx,
        snapshot_tx,
    );
    let report = mission.run().await;

    // The mission is over and its channels are gone: detach the intake so
    // no late keystroke is consumed, and let the display drain its feed
    // before the final report prints.
    input_task.abort();
    let _ = display_task.await;

    display::final_report(&report, config.report_format);
    info!(
        mission_id = %mission_id,
        phase = ?report.phase,
        ticks = report.final_status.tick,
        "Mission complete"
    );

    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
