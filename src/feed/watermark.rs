//! Per-feed synchronization watermark.
//!
//! A watermark records the canonical timestamp of the newest entry that was
//! fully delivered for a feed. It is persisted in the config file as a broken
//! down calendar table so the next run compares against the identical point.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// The "last synchronized" boundary for one feed.
///
/// Feed timestamps are normalized to UTC by the parser, so `is_dst` is always
/// recorded as false. Ordering uses the calendar fields at second granularity;
/// `weekday` and `year_day` are derived bookkeeping and do not participate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Watermark {
    /// Calendar year.
    pub year: i32,
    /// Month (1-12).
    pub month: u32,
    /// Day of month (1-31).
    pub day: u32,
    /// Hour (0-23).
    pub hour: u32,
    /// Minute (0-59).
    pub minute: u32,
    /// Second (0-59).
    pub second: u32,
    /// Day of week, Monday = 0.
    pub weekday: u32,
    /// Day of year, 1-based.
    pub year_day: u32,
    /// Daylight saving time flag.
    pub is_dst: bool,
}

impl Watermark {
    fn sort_key(&self) -> (i32, u32, u32, u32, u32, u32) {
        (
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        )
    }
}

impl From<DateTime<Utc>> for Watermark {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
            weekday: dt.weekday().num_days_from_monday(),
            year_day: dt.ordinal(),
            is_dst: false,
        }
    }
}

impl PartialEq for Watermark {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for Watermark {}

impl PartialOrd for Watermark {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Watermark {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for Watermark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02} UTC",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_from_datetime_fields() {
        // 2025-03-01 is a Saturday and day 60 of a non-leap year.
        let wm = Watermark::from(utc(2025, 3, 1, 12, 30, 45));
        assert_eq!(wm.year, 2025);
        assert_eq!(wm.month, 3);
        assert_eq!(wm.day, 1);
        assert_eq!(wm.hour, 12);
        assert_eq!(wm.minute, 30);
        assert_eq!(wm.second, 45);
        assert_eq!(wm.weekday, 5);
        assert_eq!(wm.year_day, 60);
        assert!(!wm.is_dst);
    }

    #[test]
    fn test_ordering() {
        let older = Watermark::from(utc(2025, 1, 1, 0, 0, 0));
        let newer = Watermark::from(utc(2025, 1, 1, 0, 0, 1));
        assert!(older < newer);
        assert!(newer > older);
        assert_eq!(older, Watermark::from(utc(2025, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn test_ordering_across_fields() {
        let a = Watermark::from(utc(2024, 12, 31, 23, 59, 59));
        let b = Watermark::from(utc(2025, 1, 1, 0, 0, 0));
        assert!(a < b);
    }

    #[test]
    fn test_subsecond_truncation() {
        use chrono::Duration;
        let base = utc(2025, 6, 1, 10, 0, 0);
        let with_millis = base + Duration::milliseconds(500);
        assert_eq!(Watermark::from(base), Watermark::from(with_millis));
    }

    #[test]
    fn test_display() {
        let wm = Watermark::from(utc(2025, 3, 1, 9, 5, 7));
        assert_eq!(wm.to_string(), "2025-03-01 09:05:07 UTC");
    }

    #[test]
    fn test_toml_round_trip() {
        let wm = Watermark::from(utc(2025, 3, 1, 12, 30, 45));
        let encoded = toml::to_string(&wm).unwrap();
        let decoded: Watermark = toml::from_str(&encoded).unwrap();
        assert_eq!(wm, decoded);
        assert_eq!(wm.weekday, decoded.weekday);
        assert_eq!(wm.year_day, decoded.year_day);
        assert_eq!(wm.is_dst, decoded.is_dst);
    }
}
