//! Time sources for record timestamps

use chrono::{DateTime, Duration, FixedOffset, Local};
use parking_lot::Mutex;

/// Supplies the "now" stamped onto records.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local wall-clock time with its UTC offset
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let now = Local::now();
        let offset = *now.offset();
        now.with_timezone(&offset)
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl ManualClock {
    pub fn new(start: DateTime<FixedOffset>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Parses an RFC 3339 start time.
    pub fn starting_at(rfc3339: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(rfc3339).map(Self::new)
    }

    pub fn set(&self, at: DateTime<FixedOffset>) {
        *self.now.lock() = at;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::format_timestamp;

    #[test]
    fn test_manual_clock_advances_only_when_told() {
        let clock = ManualClock::starting_at("2024-05-01T10:00:00+02:00").unwrap();
        assert_eq!(format_timestamp(clock.now()), "2024-05-01T10:00:00+02:00");
        assert_eq!(clock.now(), clock.now());

        clock.advance(Duration::seconds(90));
        assert_eq!(format_timestamp(clock.now()), "2024-05-01T10:01:30+02:00");
    }

    #[test]
    fn test_system_clock_keeps_offset() {
        let stamp = format_timestamp(SystemClock.now());
        assert!(DateTime::parse_from_rfc3339(&stamp).is_ok());
    }
}
