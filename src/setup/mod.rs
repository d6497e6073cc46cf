//! Mission parameter intake
//!
//! Prompts for the four descent parameters, one line each. Blank input
//! takes the default silently; anything that fails validation takes the
//! default with a visible notice, so a mission always starts with numbers
//! the simulation can trust.

use std::io;

use tokio::io::{AsyncBufRead, Lines};
use tracing::debug;

use crate::display;
use crate::game::MissionParameters;

pub async fn mission_parameters<R>(lines: &mut Lines<R>) -> io::Result<MissionParameters>
where
    R: AsyncBufRead + Unpin,
{
    let defaults = MissionParameters::default();

    let initial_altitude = prompt_field(
        lines,
        "Initial altitude",
        "m",
        defaults.initial_altitude,
        |v| v >= 0.0,
    )
    .await?;
    let initial_velocity = prompt_field(
        lines,
        "Initial downward velocity",
        "m/s",
        defaults.initial_velocity,
        |_| true,
    )
    .await?;
    let initial_fuel = prompt_field(lines, "Fuel on board", "kg", defaults.initial_fuel, |v| {
        v >= 0.0
    })
    .await?;
    let safe_landing_speed = prompt_field(
        lines,
        "Safe landing speed",
        "m/s",
        defaults.safe_landing_speed,
        |v| v > 0.0,
    )
    .await?;

    Ok(MissionParameters {
        initial_altitude,
        initial_velocity,
        initial_fuel,
        safe_landing_speed,
    })
}

/// Prompt for one numeric field, falling back to its default on blank,
/// unparsable, or out-of-range input. EOF during setup falls back too;
/// a pilot who pipes in fewer lines than there are prompts gets defaults
/// for the rest.
async fn prompt_field<R>(
    lines: &mut Lines<R>,
    label: &str,
    unit: &str,
    default: f64,
    valid: fn(f64) -> bool,
) -> io::Result<f64>
where
    R: AsyncBufRead + Unpin,
{
    display::parameter_prompt(label, unit, default);

    let Some(line) = lines.next_line().await? else {
        debug!(label, "Input ended during setup, using default");
        display::parameter_defaulted(label, default);
        return Ok(default);
    };

    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && valid(value) => Ok(value),
        _ => {
            debug!(label, raw = trimmed, "Invalid parameter, using default");
            display::parameter_defaulted(label, default);
            Ok(default)
        }
    }
}
