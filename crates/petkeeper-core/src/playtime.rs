//! Play-time formatting and the parental allowed-hours window.

use chrono::NaiveTime;
use petkeeper_common::{PetError, PetResult};
use serde::{Deserialize, Serialize};

/// Formats seconds as `HH:MM:SS`. Hours keep growing past 99.
#[must_use]
pub fn format_play_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Parses a wall-clock time written as `H:mm` or `HH:mm`.
///
/// # Errors
///
/// Returns [`PetError::InvalidTime`] for anything else, including out of
/// range hours or minutes.
pub fn parse_clock_time(input: &str) -> PetResult<NaiveTime> {
    let invalid = || PetError::InvalidTime(input.to_string());
    let (hours, minutes) = input.trim().split_once(':').ok_or_else(invalid)?;

    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !(1..=2).contains(&hours.len()) || minutes.len() != 2 || !digits(hours) || !digits(minutes) {
        return Err(invalid());
    }

    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(invalid)
}

/// Daily window during which play is allowed.
///
/// Half-open `[start, end)`. A window whose end is before its start wraps
/// past midnight; `start == end` places no restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedWindow {
    /// First allowed minute
    pub start: NaiveTime,
    /// First disallowed minute
    pub end: NaiveTime,
}

impl AllowedWindow {
    /// Creates a window.
    #[must_use]
    pub const fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Parses both ends with [`parse_clock_time`].
    ///
    /// # Errors
    ///
    /// Returns [`PetError::InvalidTime`] if either end is malformed.
    pub fn parse(start: &str, end: &str) -> PetResult<Self> {
        Ok(Self::new(parse_clock_time(start)?, parse_clock_time(end)?))
    }

    /// Whether the window allows every time of day.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.start == self.end
    }

    /// Whether play is allowed at `now`.
    #[must_use]
    pub fn contains(&self, now: NaiveTime) -> bool {
        if self.is_unrestricted() {
            true
        } else if self.start < self.end {
            self.start <= now && now < self.end
        } else {
            now >= self.start || now < self.end
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    #[test]
    fn test_format_play_time() {
        assert_eq!(format_play_time(0), "00:00:00");
        assert_eq!(format_play_time(3725), "01:02:05");
        assert_eq!(format_play_time(360_000), "100:00:00");
    }

    #[test]
    fn test_parse_clock_time() {
        assert_eq!(parse_clock_time("8:05").ok(), Some(at(8, 5)));
        assert_eq!(parse_clock_time("20:30").ok(), Some(at(20, 30)));
        assert_eq!(parse_clock_time("00:00").ok(), Some(at(0, 0)));
    }

    #[test]
    fn test_parse_clock_time_rejects() {
        for bad in ["", "8", "8:5", "24:00", "12:60", "123:00", "ab:cd", "-1:00", "8:05pm"] {
            assert!(parse_clock_time(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_daytime_window() {
        let window = AllowedWindow::new(at(8, 0), at(20, 0));
        assert!(!window.contains(at(7, 59)));
        assert!(window.contains(at(8, 0)));
        assert!(window.contains(at(19, 59)));
        assert!(!window.contains(at(20, 0)));
    }

    #[test]
    fn test_overnight_window_wraps() {
        let window = AllowedWindow::new(at(22, 0), at(6, 0));
        assert!(window.contains(at(23, 30)));
        assert!(window.contains(at(2, 0)));
        assert!(!window.contains(at(6, 0)));
        assert!(!window.contains(at(12, 0)));
    }

    #[test]
    fn test_equal_ends_unrestricted() {
        let window = AllowedWindow::new(at(9, 0), at(9, 0));
        assert!(window.is_unrestricted());
        assert!(window.contains(at(3, 0)));
    }
}
