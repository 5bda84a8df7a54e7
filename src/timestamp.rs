use chrono::{NaiveTime, TimeDelta, Timelike};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::{Result, ShiftError};

/// SRT timestamp layout, `HH:MM:SS,mmm`
const SRT_TIME_FORMAT: &str = "%H:%M:%S,%3f";

/// Textual width of an SRT timestamp
const SRT_TIME_LEN: usize = 12;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("expected HH:MM:SS,mmm, got {0:?}")]
    Shape(String),

    #[error("invalid timestamp {text:?}: {source}")]
    Value {
        text: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// A point within a single day, millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveTime);

impl Timestamp {
    /// Add `offset`, wrapping around midnight in either direction.
    pub fn wrapping_shift(self, offset: Offset) -> Self {
        let (time, _) = self.0.overflowing_add_signed(offset.0);
        Self(time)
    }

    /// Add `offset`, or `None` when the result leaves the day.
    pub fn checked_shift(self, offset: Offset) -> Option<Self> {
        match self.0.overflowing_add_signed(offset.0) {
            (time, 0) => Some(Self(time)),
            _ => None,
        }
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if !has_srt_shape(s) {
            return Err(TimestampError::Shape(s.to_string()));
        }

        let time = NaiveTime::parse_from_str(s, SRT_TIME_FORMAT).map_err(|source| {
            TimestampError::Value {
                text: s.to_string(),
                source,
            }
        })?;

        // chrono accepts second 60 as a leap second; SRT has no such thing
        if time.nanosecond() >= 1_000_000_000 {
            return Err(TimestampError::Shape(s.to_string()));
        }

        Ok(Self(time))
    }
}

impl fmt::Display for Timestamp {
    /// Milliseconds are truncated, never rounded.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(SRT_TIME_FORMAT))
    }
}

fn has_srt_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == SRT_TIME_LEN
        && b.iter().enumerate().all(|(i, c)| match i {
            2 | 5 => *c == b':',
            8 => *c == b',',
            _ => c.is_ascii_digit(),
        })
}

/// Signed shift applied to every timestamp of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset(TimeDelta);

impl Offset {
    /// Build an offset from seconds, rounded to the nearest microsecond.
    pub fn from_seconds(seconds: f64) -> Result<Self> {
        if !seconds.is_finite() {
            return Err(ShiftError::Argument(format!(
                "offset must be a finite number of seconds, got {}",
                seconds
            )));
        }

        let micros = (seconds * 1_000_000.0).round() as i64;
        Ok(Self(TimeDelta::microseconds(micros)))
    }

    pub fn from_millis(millis: i64) -> Self {
        Self(TimeDelta::milliseconds(millis))
    }

    pub fn as_seconds_f64(&self) -> f64 {
        match self.0.num_microseconds() {
            Some(micros) => micros as f64 / 1_000_000.0,
            None => self.0.num_milliseconds() as f64 / 1_000.0,
        }
    }
}

impl std::ops::Neg for Offset {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// What to do with a shifted timestamp that leaves 00:00:00,000..24:00:00,000
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampPolicy {
    /// Wrap around midnight like plain time-of-day arithmetic
    #[default]
    Wrap,
    /// Reject the document
    Strict,
}

impl TimestampPolicy {
    pub fn apply(self, timestamp: Timestamp, offset: Offset) -> Option<Timestamp> {
        match self {
            TimestampPolicy::Wrap => Some(timestamp.wrapping_shift(offset)),
            TimestampPolicy::Strict => timestamp.checked_shift(offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_format() {
        assert_eq!(ts("00:00:00,000").to_string(), "00:00:00,000");
        assert_eq!(ts("01:01:05,123").to_string(), "01:01:05,123");
        assert_eq!(ts("23:59:59,999").to_string(), "23:59:59,999");
        assert_eq!(ts("01:02:03,004"), Timestamp(NaiveTime::from_hms_milli_opt(1, 2, 3, 4).unwrap()));
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        for bad in [
            "00:00:01",
            "00:00:01.000",
            "0:00:01,000",
            " 0:00:01,000",
            "00:00:01,0000",
            "00:00:01,00",
            "aa:00:01,000",
            "",
        ] {
            assert!(
                matches!(bad.parse::<Timestamp>(), Err(TimestampError::Shape(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range_fields() {
        assert!("24:00:00,000".parse::<Timestamp>().is_err());
        assert!("00:60:00,000".parse::<Timestamp>().is_err());
        assert!("00:00:60,000".parse::<Timestamp>().is_err());
    }

    #[test]
    fn test_wrapping_shift() {
        let offset = Offset::from_seconds(-1.5).unwrap();
        assert_eq!(ts("00:00:01,000").wrapping_shift(offset).to_string(), "23:59:59,500");

        let offset = Offset::from_seconds(2.0).unwrap();
        assert_eq!(ts("23:59:59,000").wrapping_shift(offset).to_string(), "00:00:01,000");
    }

    #[test]
    fn test_checked_shift() {
        let back = Offset::from_seconds(-1.5).unwrap();
        assert_eq!(ts("00:00:01,000").checked_shift(back), None);
        assert_eq!(ts("00:00:02,000").checked_shift(back), Some(ts("00:00:00,500")));

        let forward = Offset::from_seconds(1.0).unwrap();
        assert_eq!(ts("23:59:59,000").checked_shift(forward), None);
    }

    #[test]
    fn test_shift_truncates_milliseconds() {
        let offset = Offset::from_seconds(0.0019).unwrap();
        assert_eq!(ts("00:00:01,000").wrapping_shift(offset).to_string(), "00:00:01,001");
    }

    #[test]
    fn test_offset_from_seconds() {
        assert_eq!(Offset::from_seconds(2.5).unwrap(), Offset::from_millis(2500));
        assert_eq!(Offset::from_seconds(-0.25).unwrap().as_seconds_f64(), -0.25);
        assert!(matches!(
            Offset::from_seconds(f64::NAN),
            Err(ShiftError::Argument(_))
        ));
        assert!(Offset::from_seconds(f64::INFINITY).is_err());
    }

    #[test]
    fn test_policy_apply() {
        let offset = Offset::from_seconds(-2.0).unwrap();
        assert_eq!(
            TimestampPolicy::Wrap.apply(ts("00:00:01,000"), offset),
            Some(ts("23:59:59,000"))
        );
        assert_eq!(TimestampPolicy::Strict.apply(ts("00:00:01,000"), offset), None);
        assert_eq!(TimestampPolicy::default(), TimestampPolicy::Wrap);
    }
}
