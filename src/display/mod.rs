//! Pilot-facing terminal output
//!
//! Everything printed to stdout lives here; the simulation core only ever
//! hands over read-only snapshots. Tracing goes to stderr, so log lines and
//! the flight display never fight over the same stream.

use colored::Colorize;
use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};
use tracing::error;

use crate::config::ReportFormat;
use crate::game::{MissionParameters, MissionPhase, MissionReport, StatusSnapshot};
use crate::input::CommandError;

pub fn banner() {
    println!();
    println!("{}", "==== LUNAR DESCENT ====".bold());
    println!("Bring the vehicle down gently. Press enter to accept a default.");
    println!();
}

pub fn parameter_prompt(label: &str, unit: &str, default: f64) {
    println!("{} ({}) [{}]:", label.bold(), unit, default);
}

pub fn parameter_defaulted(label: &str, default: f64) {
    println!(
        "{} {} set to default {}",
        "Invalid input:".bright_yellow().bold(),
        label,
        default
    );
}

pub fn mission_summary(params: &MissionParameters) {
    println!();
    println!(
        "Descent from {} m at {} m/s with {} kg of fuel. Land at or below {} m/s.",
        params.initial_altitude,
        params.initial_velocity,
        params.initial_fuel,
        params.safe_landing_speed
    );
}

pub async fn countdown(secs: u32) {
    for n in (1..=secs).rev() {
        println!("{}", format!("T-minus {n}...").bright_yellow().bold());
        sleep(Duration::from_secs(1)).await;
    }
    println!(
        "{}",
        "Descent engine live. Type a thrust setting (0-100) and press enter."
            .bright_green()
            .bold()
    );
}

/// Render each status snapshot as it arrives, until the mission closes
/// the feed.
pub async fn status_feed(mut snapshot_rx: mpsc::Receiver<StatusSnapshot>) {
    while let Some(snapshot) = snapshot_rx.recv().await {
        tick_line(&snapshot);
    }
}

fn tick_line(s: &StatusSnapshot) {
    let direction = if s.velocity >= 0.0 { "v" } else { "^" };
    let fuel = if s.out_of_fuel {
        "   FUEL OUT".bright_red().bold().to_string()
    } else if s.fuel < 100.0 {
        format!("{:>8.1} kg", s.fuel).bright_yellow().to_string()
    } else {
        format!("{:>8.1} kg", s.fuel)
    };

    println!(
        "[{:>4}]  alt {:>9.2} m  {} {:>8.2} m/s  fuel {}  thrust {:>5.1}%",
        s.tick,
        s.altitude,
        direction,
        s.velocity.abs(),
        fuel,
        s.thrust_command
    );
}

pub fn command_rejected(err: &CommandError) {
    println!("{} {}", "Ignored:".bright_red().bold(), err);
}

pub fn command_clamped(requested: f64, commanded: f64) {
    println!(
        "{} {} clamped to {}",
        "Out of range:".bright_yellow().bold(),
        requested,
        commanded
    );
}

pub fn final_report(report: &MissionReport, format: ReportFormat) {
    match format {
        ReportFormat::Text => text_report(report),
        ReportFormat::Json => match serde_json::to_string(report) {
            Ok(line) => println!("{line}"),
            Err(err) => error!(error = %err, "Failed to serialize mission report"),
        },
    }
}

fn text_report(report: &MissionReport) {
    let status = &report.final_status;

    println!();
    match report.phase {
        MissionPhase::Landed => {
            println!("{}", "TOUCHDOWN - the vehicle is down safely.".bright_green().bold());
        }
        MissionPhase::Crashed => {
            println!("{}", "CRASH - the vehicle was destroyed on impact.".bright_red().bold());
        }
        MissionPhase::Interrupted => {
            println!("{}", "ABORTED - descent interrupted.".bright_yellow().bold());
        }
        // The control loop only ever reports terminal phases.
        MissionPhase::Setup | MissionPhase::Countdown | MissionPhase::Flying => {}
    }

    if let Some(impact) = status.impact_velocity {
        println!("  impact velocity  {impact:.2} m/s");
    } else {
        println!("  altitude         {:.2} m", status.altitude);
        println!("  velocity         {:.2} m/s", status.velocity);
    }
    println!("  fuel remaining   {:.1} kg", status.fuel);
    println!(
        "  flight time      {:.0} s over {} ticks",
        report.flight_time_secs, status.tick
    );
    println!(
        "  completed at     {}",
        report.completed_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}
