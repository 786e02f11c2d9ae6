//! Clock times in the timetable's `HHMM` encoding.
//!
//! Timetable files store times as plain integers such as `830` or `1745`.
//! Durations between two times are always computed in minutes since
//! midnight, never by subtracting the encoded integers.

use chrono::{NaiveTime, Timelike};
use std::fmt;

/// Error returned when a clock time cannot be parsed or encoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid clock time: {reason}")]
pub struct InvalidClockTime {
    reason: &'static str,
}

impl InvalidClockTime {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day within a single service day.
///
/// Trips are never modelled across midnight, so a `ClockTime` carries no
/// date. Ordering follows the time of day.
///
/// # Examples
///
/// ```
/// use route_server::domain::ClockTime;
///
/// let t = ClockTime::from_hhmm(830).unwrap();
/// assert_eq!(t.hhmm(), 830);
/// assert_eq!(t.minutes_since_midnight(), 8 * 60 + 30);
/// assert_eq!(t.to_string(), "08:30");
///
/// // Minutes above 59 are rejected
/// assert!(ClockTime::from_hhmm(875).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Build a clock time from hours (0-23) and minutes (0-59).
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, InvalidClockTime> {
        if hour > 23 {
            return Err(InvalidClockTime::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(InvalidClockTime::new("minute must be 0-59"));
        }
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| InvalidClockTime::new("invalid time"))
    }

    /// Decode an `HHMM` integer (`0` to `2359`).
    pub fn from_hhmm(encoded: u32) -> Result<Self, InvalidClockTime> {
        Self::from_hm(encoded / 100, encoded % 100)
    }

    /// Parse either `HHMM` digits (leading zeros optional) or `HH:MM`.
    ///
    /// ```
    /// use route_server::domain::ClockTime;
    ///
    /// assert_eq!(ClockTime::parse("0830").unwrap().hhmm(), 830);
    /// assert_eq!(ClockTime::parse("830").unwrap().hhmm(), 830);
    /// assert_eq!(ClockTime::parse("08:30").unwrap().hhmm(), 830);
    /// assert!(ClockTime::parse("8.30").is_err());
    /// assert!(ClockTime::parse("").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, InvalidClockTime> {
        let s = s.trim();
        if s.is_empty() {
            return Err(InvalidClockTime::new("empty time"));
        }

        if let Some((hours, minutes)) = s.split_once(':') {
            if minutes.len() != 2 {
                return Err(InvalidClockTime::new("expected two minute digits"));
            }
            let hour = parse_digits(hours).ok_or_else(|| InvalidClockTime::new("invalid hour"))?;
            let minute =
                parse_digits(minutes).ok_or_else(|| InvalidClockTime::new("invalid minute"))?;
            return Self::from_hm(hour, minute);
        }

        if s.len() > 4 {
            return Err(InvalidClockTime::new("expected at most four digits"));
        }
        let encoded = parse_digits(s).ok_or_else(|| InvalidClockTime::new("expected digits"))?;
        Self::from_hhmm(encoded)
    }

    /// Returns the `HHMM` integer encoding.
    pub fn hhmm(&self) -> u32 {
        self.0.hour() * 100 + self.0.minute()
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_since_midnight(&self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }

    /// Minutes from `self` until `later`, or `None` if `later` is earlier.
    pub fn minutes_until(&self, later: ClockTime) -> Option<u32> {
        later
            .minutes_since_midnight()
            .checked_sub(self.minutes_since_midnight())
    }

    /// The same clock reading twelve hours earlier, if it falls on this day.
    ///
    /// `1400` becomes `0200`; anything before noon has no earlier reading.
    pub fn twelve_hours_earlier(&self) -> Option<ClockTime> {
        let hour = self.0.hour().checked_sub(12)?;
        Self::from_hm(hour, self.0.minute()).ok()
    }

    /// Returns the underlying chrono time.
    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:04})", self.hhmm())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every valid hour/minute pair decodes and reports the same fields.
        #[test]
        fn valid_pairs_decode(hour in 0u32..24, minute in 0u32..60) {
            let time = ClockTime::from_hhmm(hour * 100 + minute).unwrap();
            prop_assert_eq!(time.hour(), hour);
            prop_assert_eq!(time.minute(), minute);
        }

        /// minutes_until agrees with the ordering of the two times.
        #[test]
        fn minutes_until_matches_ordering(a in 0u32..1440, b in 0u32..1440) {
            let ta = ClockTime::from_hm(a / 60, a % 60).unwrap();
            let tb = ClockTime::from_hm(b / 60, b % 60).unwrap();
            match ta.minutes_until(tb) {
                Some(mins) => {
                    prop_assert!(ta <= tb);
                    prop_assert_eq!(mins, b - a);
                }
                None => prop_assert!(ta > tb),
            }
        }

        /// Minute digits of 60 or more never decode.
        #[test]
        fn bad_minutes_rejected(hour in 0u32..24, minute in 60u32..100) {
            prop_assert!(ClockTime::from_hhmm(hour * 100 + minute).is_err());
        }
    }
}
