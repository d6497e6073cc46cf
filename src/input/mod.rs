//! Pilot command intake
//!
//! One async task owns the line stream for the whole flight. It re-arms
//! after every accepted or rejected line, so the pilot always has an open
//! prompt between ticks; only validated, clamped values ever reach the
//! control loop.

use tokio::io::{AsyncBufRead, Lines};
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use crate::display;
use crate::game::PilotCommand;
use crate::util::time::unix_millis;

/// Why a line of pilot input was rejected
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0:?} is not a number, thrust unchanged")]
    NotANumber(String),
}

/// One parsed line of pilot input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedLine {
    /// Blank line; no change requested
    Empty,
    /// A thrust request, clamped into the commandable range
    Thrust { requested: f64, commanded: f64 },
}

/// Parse one raw line into a thrust request.
///
/// Whitespace-only lines are an explicit no-op, not an error. Anything
/// that does not parse as a finite number is rejected.
pub fn parse_line(line: &str) -> Result<ParsedLine, CommandError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(ParsedLine::Empty);
    }

    let requested: f64 = trimmed
        .parse()
        .map_err(|_| CommandError::NotANumber(trimmed.to_string()))?;
    if !requested.is_finite() {
        return Err(CommandError::NotANumber(trimmed.to_string()));
    }

    Ok(ParsedLine::Thrust {
        requested,
        commanded: requested.clamp(0.0, 100.0),
    })
}

/// Read pilot lines until the mission ends or the abort flag trips.
///
/// Closing our sender is the signal the control loop uses to detect a dead
/// intake, so this task simply returns on EOF or read failure and lets the
/// drop do the talking.
pub async fn pilot_command_task<R>(
    mut lines: Lines<R>,
    command_tx: mpsc::Sender<PilotCommand>,
    mut abort_rx: watch::Receiver<bool>,
) where
    R: AsyncBufRead + Unpin,
{
    loop {
        tokio::select! {
            changed = abort_rx.changed() => {
                if changed.is_err() || *abort_rx.borrow() {
                    debug!("Pilot intake stopping on abort");
                    break;
                }
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => match parse_line(&line) {
                        Ok(ParsedLine::Empty) => {}
                        Ok(ParsedLine::Thrust { requested, commanded }) => {
                            if requested != commanded {
                                display::command_clamped(requested, commanded);
                            }
                            let cmd = PilotCommand {
                                thrust: commanded,
                                received_at: unix_millis(),
                            };
                            if command_tx.send(cmd).await.is_err() {
                                debug!("Command channel closed, pilot intake stopping");
                                break;
                            }
                        }
                        Err(err) => {
                            warn!(error = %err, "Rejected pilot input");
                            display::command_rejected(&err);
                        }
                    },
                    Ok(None) => {
                        debug!("Pilot input stream ended");
                        break;
                    }
                    Err(err) => {
                        warn!(error = %err, "Failed to read pilot input");
                        break;
                    }
                }
            }
        }
    }
}
