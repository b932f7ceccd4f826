//! Timer input form and validation

use std::time::Duration;
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timer::countdown::MAX_DURATION;

/// Validation failures shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("please enter minutes or hour set")]
    Empty,
    #[error("minutes must be a positive number")]
    InvalidMinutes,
    #[error("hour set must be 4 digits (HHMM)")]
    HourSetLength,
    #[error("hour set must be numbers")]
    HourSetDigits,
    #[error("invalid time (HH:00-23:59)")]
    HourSetRange,
    #[error("local time {hour:02}:{minute:02} does not exist today")]
    NonexistentLocalTime { hour: u32, minute: u32 },
    #[error("duration is too large")]
    TooLarge,
}

/// The three text fields a user fills in to start a timer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerForm {
    /// Label shown next to the countdown
    pub name: String,
    /// Relative duration in minutes, fractions allowed
    pub minutes: String,
    /// Absolute clock time as HHMM
    pub hour_set: String,
}

/// A 24h wall-clock time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl TimerForm {
    /// Form using the minutes field only
    pub fn with_minutes(name: impl Into<String>, minutes: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            minutes: minutes.into(),
            hour_set: String::new(),
        }
    }

    /// Form using the hour set field only
    pub fn with_hour_set(name: impl Into<String>, hour_set: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            minutes: String::new(),
            hour_set: hour_set.into(),
        }
    }

    /// Resolve the form into a countdown span measured from `now`.
    ///
    /// Minutes take priority: a non-empty minutes field is used (or rejected)
    /// without looking at the hour set.
    pub fn duration_from<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<Duration, InputError> {
        let minutes = self.minutes.trim();
        let hour_set = self.hour_set.trim();

        if !minutes.is_empty() {
            parse_minutes(minutes)
        } else if !hour_set.is_empty() {
            let time = parse_hour_set(hour_set)?;
            duration_until(time, now)
        } else {
            Err(InputError::Empty)
        }
    }
}

/// Parse a strictly positive, finite number of minutes
pub fn parse_minutes(text: &str) -> Result<Duration, InputError> {
    let minutes: f64 = text.trim().parse().map_err(|_| InputError::InvalidMinutes)?;
    if !minutes.is_finite() || minutes <= 0.0 {
        return Err(InputError::InvalidMinutes);
    }

    let duration = Duration::try_from_secs_f64(minutes * 60.0).map_err(|_| InputError::TooLarge)?;
    if duration > MAX_DURATION {
        return Err(InputError::TooLarge);
    }
    Ok(duration)
}

/// Parse exactly four ASCII digits as HHMM
pub fn parse_hour_set(text: &str) -> Result<ClockTime, InputError> {
    let text = text.trim();
    if text.chars().count() != 4 {
        return Err(InputError::HourSetLength);
    }
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::HourSetDigits);
    }

    let hour: u32 = text[..2].parse().map_err(|_| InputError::HourSetDigits)?;
    let minute: u32 = text[2..].parse().map_err(|_| InputError::HourSetDigits)?;
    if hour > 23 || minute > 59 {
        return Err(InputError::HourSetRange);
    }
    Ok(ClockTime { hour, minute })
}

/// Span from `now` until the next occurrence of `time`.
///
/// Today's occurrence is used unless it is already in the past, in which case
/// the target rolls forward 24 hours.
pub fn duration_until<Tz: TimeZone>(time: ClockTime, now: &DateTime<Tz>) -> Result<Duration, InputError> {
    let naive = now
        .date_naive()
        .and_hms_opt(time.hour, time.minute, 0)
        .ok_or(InputError::HourSetRange)?;

    let mut target = now
        .timezone()
        .from_local_datetime(&naive)
        .earliest()
        .ok_or(InputError::NonexistentLocalTime {
            hour: time.hour,
            minute: time.minute,
        })?;

    if target < *now {
        target = target + chrono::Duration::hours(24);
    }

    (target - now.clone()).to_std().map_err(|_| InputError::TooLarge)
}
