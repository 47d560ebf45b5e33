//! # Standard Tools
//!
//! Local tools with no external effects.

pub mod magic;

#[cfg(feature = "clock")]
pub mod clock;

pub use magic::MagicTool;

#[cfg(feature = "clock")]
pub use clock::{Clock, ClockError, FixedClock, SystemClock, TimezoneClockTool};
