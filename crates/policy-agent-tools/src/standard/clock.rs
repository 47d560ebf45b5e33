//! # Timezone Clock Tool
//!
//! Reports the current wall-clock time in an IANA timezone. The source of
//! "now" is injected through [`Clock`] so results can be pinned in tests.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use policy_agent_core::{
    BoundArgs, FailureKind, ParamType, Tool, ToolDescriptor, ToolEffect, ToolFailure, ToolResult,
};
use std::sync::Arc;

/// Timestamp layout of the tool's answer
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    #[error("'{name}' is not a recognized IANA timezone ({reason})")]
    UnknownTimezone { name: String, reason: String },
}

/// Resolve `timezone` and format `instant` in it.
pub fn local_time_in(timezone: &str, instant: DateTime<Utc>) -> Result<String, ClockError> {
    let tz = timezone
        .parse::<Tz>()
        .map_err(|e| ClockError::UnknownTimezone {
            name: timezone.to_string(),
            reason: e.to_string(),
        })?;

    Ok(instant.with_timezone(&tz).format(TIME_FORMAT).to_string())
}

/// `get_current_time_in_timezone`
pub struct TimezoneClockTool {
    descriptor: ToolDescriptor,
    clock: Arc<dyn Clock>,
}

impl TimezoneClockTool {
    pub const NAME: &'static str = "get_current_time_in_timezone";

    /// Tool backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let descriptor = ToolDescriptor::builder(Self::NAME)
            .description("A tool that fetches the current local time in a specified timezone.")
            .param(
                "timezone",
                ParamType::String,
                "A string representing a valid timezone (e.g., 'America/New_York').",
            )
            .effect(ToolEffect::ReadOnly)
            .build()
            .unwrap_or_else(|e| unreachable!("static descriptor is valid: {e}"));

        Self { descriptor, clock }
    }
}

impl Default for TimezoneClockTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for TimezoneClockTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn execute(&self, args: &BoundArgs) -> ToolResult {
        let timezone = args.str("timezone").map_err(|e| {
            ToolFailure::new(
                FailureKind::InvalidArgument,
                "fetching time for timezone",
                e,
            )
        })?;

        let local_time = local_time_in(timezone, self.clock.now()).map_err(|e| {
            ToolFailure::new(
                FailureKind::InvalidArgument,
                format!("fetching time for timezone '{timezone}'"),
                e,
            )
        })?;

        Ok(format!(
            "The current local time in {timezone} is: {local_time}"
        ))
    }
}
