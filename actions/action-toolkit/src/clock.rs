//! Wall-clock access and time-of-day formatting.

use chrono::{DateTime, FixedOffset, Local};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// The host's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Formats the time of day as `HH:MM:SS GMT+hhmm (zone)`.
///
/// The zone label is `UTC` for a zero offset and `UTC+hh:mm` otherwise.
pub fn time_of_day(at: &DateTime<FixedOffset>) -> String {
    let zone = if at.offset().local_minus_utc() == 0 {
        "UTC".to_string()
    } else {
        format!("UTC{}", at.format("%:z"))
    };
    format!("{} ({zone})", at.format("%H:%M:%S GMT%z"))
}
