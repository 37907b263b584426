// crates/districts-core/src/clock.rs
use chrono::{DateTime, Utc};

/// Source of the human-readable time stamp appended to saved notes.
pub trait Clock {
    fn timestamp(&self) -> String;
}

/// Wall clock, formatted as `YYYY-MM-DD HH:MM:SS UTC`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> String {
        format_utc(Utc::now())
    }
}

/// Always returns the same stamp. Handy for tests and replays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn timestamp(&self) -> String {
        self.0.clone()
    }
}

pub fn format_utc(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_known_instants() {
        let at = |secs| DateTime::from_timestamp(secs, 0).unwrap();
        assert_eq!(format_utc(at(0)), "1970-01-01 00:00:00 UTC");
        assert_eq!(format_utc(at(951_782_400)), "2000-02-29 00:00:00 UTC");
        assert_eq!(format_utc(at(1_700_000_000)), "2023-11-14 22:13:20 UTC");
    }

    #[test]
    fn system_clock_uses_the_same_layout() {
        let stamp = SystemClock.timestamp();
        assert!(stamp.ends_with(" UTC"));
        assert_eq!(stamp.len(), "2000-01-01 00:00:00 UTC".len());
    }
}
