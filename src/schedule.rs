//! Schedule normalization and duration parsing.
//!
//! Task lines carry free-form duration text (`9h30m`, `45m`). The indexer
//! decomposes that text into a [`RawDuration`]; the normalizer validates the
//! decomposition into a [`TimeOfDay`] that downstream consumers can trust.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures raised while normalizing a schedule value.
///
/// The display strings are part of the contract: they are the messages
/// surfaced to the user, in the order the checks run.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Duration should be moment duration")]
    NotADuration,

    #[error("hour should be between 0 and 23")]
    HourOutOfRange,

    #[error("minutes should be between 0 and 59")]
    MinutesOutOfRange,

    #[error("only hours and minutes should be populated")]
    ExtraComponents,
}

/// A duration-like value decomposed into calendar components.
///
/// Components absent from the source text stay `None`; a component parsed
/// as zero is `Some(0)`. The distinction matters: the normalizer requires
/// hours and minutes to be present, not merely zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDuration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds: Option<i64>,
}

impl RawDuration {
    /// Build a duration carrying only hours and minutes.
    pub fn hours_minutes(hours: i64, minutes: i64) -> Self {
        Self {
            hours: Some(hours),
            minutes: Some(minutes),
            ..Self::default()
        }
    }
}

/// A validated wall-clock time of day.
///
/// Constructed only by [`normalize`]; the fields are private so an
/// out-of-range value cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Hour in [0, 23].
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute in [0, 59].
    pub fn minute(&self) -> u8 {
        self.minute
    }
}

/// Validate a raw duration into a time of day.
///
/// Checks run in a fixed order so the first applicable message wins:
/// presence of hours and minutes, hour range, minute range, then absence of
/// any other populated component.
pub fn normalize(raw: &RawDuration) -> Result<TimeOfDay, ScheduleError> {
    let (hours, minutes) = match (raw.hours, raw.minutes) {
        (Some(hours), Some(minutes)) => (hours, minutes),
        _ => return Err(ScheduleError::NotADuration),
    };

    if !(0..=23).contains(&hours) {
        return Err(ScheduleError::HourOutOfRange);
    }
    if !(0..=59).contains(&minutes) {
        return Err(ScheduleError::MinutesOutOfRange);
    }
    if raw.days.unwrap_or(0) != 0 || raw.seconds.unwrap_or(0) != 0 {
        return Err(ScheduleError::ExtraComponents);
    }

    Ok(TimeOfDay {
        hour: hours as u8,
        minute: minutes as u8,
    })
}

/// Decompose free-form schedule text like "9h30m" or "45m" into components.
///
/// A pure input transform: unrecognized input yields an empty decomposition,
/// which [`normalize`] then rejects with its own message.
pub fn parse_duration_text(text: &str) -> RawDuration {
    let mut out = RawDuration::default();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return out;
    }

    let mut chars = trimmed.chars().peekable();
    while chars.peek().is_some() {
        let mut number = String::new();
        while let Some(c) = chars.peek() {
            if c.is_ascii_digit() {
                number.push(*c);
                chars.next();
            } else {
                break;
            }
        }

        while let Some(c) = chars.peek() {
            if c.is_whitespace() {
                chars.next();
            } else {
                break;
            }
        }

        let mut unit = String::new();
        while let Some(c) = chars.peek() {
            if c.is_ascii_alphabetic() {
                unit.push(*c);
                chars.next();
            } else {
                break;
            }
        }

        while let Some(c) = chars.peek() {
            if c.is_whitespace() {
                chars.next();
            } else {
                break;
            }
        }

        let value: i64 = match number.parse() {
            Ok(value) => value,
            Err(_) => return RawDuration::default(),
        };

        let slot = match unit.to_lowercase().as_str() {
            "d" | "day" | "days" => &mut out.days,
            "h" | "hr" | "hour" | "hours" => &mut out.hours,
            "m" | "min" | "minute" | "minutes" => &mut out.minutes,
            "s" | "sec" | "second" | "seconds" => &mut out.seconds,
            _ => return RawDuration::default(),
        };
        *slot = Some(slot.unwrap_or(0) + value);
    }

    out
}
