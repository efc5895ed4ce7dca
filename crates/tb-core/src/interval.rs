//! Turning a time-block string into clock times.

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::{Captures, Regex};
use serde::Serialize;
use thiserror::Error;

use crate::grammar::{HOURS_EXT, LEAD_IN, MERIDIEM, MINUTES, SEPARATOR};

/// Errors from [`parse_time_block`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeBlockError {
    /// The text does not have the shape of a single time block.
    #[error("not a time block: {0:?}")]
    Unrecognized(String),

    /// The hour is not a real hour on the clock in use.
    #[error("hour {hour} is out of range for a {clock} clock")]
    HourOutOfRange { hour: u32, clock: &'static str },
}

static SPAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    let part = |name: &str| {
        format!(
            r"(?P<{name}_hour>{HOURS_EXT})(?::(?P<{name}_minute>{MINUTES}))?(?:\s?(?P<{name}_meridiem>{MERIDIEM}))?"
        )
    };
    Regex::new(&format!(
        r"^(?:{LEAD_IN}\s+)?{}(?:{SEPARATOR}{})?$",
        part("start"),
        part("end")
    ))
    .expect("valid time-block span pattern")
});

/// A start time with an optional end.
///
/// A block without an end is a single instant and never contains a time.
/// An end earlier than the start runs on past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeInterval {
    pub start: NaiveTime,
    pub end: Option<NaiveTime>,
}

impl TimeInterval {
    /// Whether `time` falls in `[start, end)`.
    pub fn contains(&self, time: NaiveTime) -> bool {
        match self.end {
            Some(end) if end > self.start => self.start <= time && time < end,
            Some(end) if end < self.start => time >= self.start,
            _ => false,
        }
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start.format("%H:%M"))?;
        if let Some(end) = self.end {
            write!(f, "-{}", end.format("%H:%M"))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

#[derive(Debug, Clone, Copy)]
enum Hour {
    Numeric(u32),
    Noon,
    Midnight,
}

#[derive(Debug, Clone, Copy)]
struct ClockPart {
    hour: Hour,
    minute: u32,
    meridiem: Option<Meridiem>,
}

impl ClockPart {
    fn from_captures(caps: &Captures<'_>, name: &str) -> Option<Self> {
        let hour = caps.name(&format!("{name}_hour"))?.as_str();
        let hour = match hour.to_ascii_lowercase().as_str() {
            "noon" => Hour::Noon,
            "midnight" => Hour::Midnight,
            digits => Hour::Numeric(digits.parse().ok()?),
        };
        let minute = match caps.name(&format!("{name}_minute")) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };
        let meridiem = caps
            .name(&format!("{name}_meridiem"))
            .map(|m| match m.as_str() {
                "AM" | "am" => Meridiem::Am,
                _ => Meridiem::Pm,
            });
        Some(Self {
            hour,
            minute,
            meridiem,
        })
    }

    /// Clock time, reading the hour with `meridiem` if one applies.
    fn resolve(self, meridiem: Option<Meridiem>) -> Result<NaiveTime, TimeBlockError> {
        let hour = match (self.hour, meridiem) {
            (Hour::Noon, _) => 12,
            (Hour::Midnight, _) => 0,
            (Hour::Numeric(h), Some(m)) => {
                if !(1..=12).contains(&h) {
                    return Err(TimeBlockError::HourOutOfRange {
                        hour: h,
                        clock: "12-hour",
                    });
                }
                match m {
                    Meridiem::Am => h % 12,
                    Meridiem::Pm => h % 12 + 12,
                }
            }
            (Hour::Numeric(h), None) => h,
        };
        NaiveTime::from_hms_opt(hour, self.minute, 0).ok_or(TimeBlockError::HourOutOfRange {
            hour,
            clock: "24-hour",
        })
    }

    /// Resolves this part, borrowing the other end's AM/PM when that keeps
    /// the range in order.
    fn resolve_against(
        self,
        other: Meridiem,
        in_order: impl Fn(NaiveTime) -> bool,
    ) -> Result<NaiveTime, TimeBlockError> {
        if self.meridiem.is_none() {
            if let Ok(time) = self.resolve(Some(other)) {
                if in_order(time) {
                    return Ok(time);
                }
            }
        }
        self.resolve(self.meridiem)
    }
}

/// Parses a time-block string such as `2-3PM` or `at 14:00 - 15:30`.
///
/// A side without AM/PM takes the other side's marker when that keeps the
/// range in order (`2-3PM` is 14:00-15:00, `11-1PM` is 11:00-13:00). Without
/// any marker hours are read on a 24-hour clock.
pub fn parse_time_block(text: &str) -> Result<TimeInterval, TimeBlockError> {
    let text = text.trim();
    let caps = SPAN_RE
        .captures(text)
        .ok_or_else(|| TimeBlockError::Unrecognized(text.to_string()))?;
    let unrecognized = || TimeBlockError::Unrecognized(text.to_string());

    let start = ClockPart::from_captures(&caps, "start").ok_or_else(unrecognized)?;
    if caps.name("end_hour").is_none() {
        return Ok(TimeInterval {
            start: start.resolve(start.meridiem)?,
            end: None,
        });
    }
    let end = ClockPart::from_captures(&caps, "end").ok_or_else(unrecognized)?;

    let (start_time, end_time) = match (start.meridiem, end.meridiem) {
        (None, Some(m)) => {
            let end_time = end.resolve(Some(m))?;
            (start.resolve_against(m, |t| t <= end_time)?, end_time)
        }
        (Some(m), None) => {
            let start_time = start.resolve(Some(m))?;
            (start_time, end.resolve_against(m, |t| t >= start_time)?)
        }
        _ => (start.resolve(start.meridiem)?, end.resolve(end.meridiem)?),
    };

    Ok(TimeInterval {
        start: start_time,
        end: Some(end_time),
    })
}
