use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::path::Path;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Result, ScheduleError};
use crate::models::{ActivityState, Color, Palette, Weekday};

pub const MINUTES_PER_DAY: u16 = 1440;

/// Minutes since midnight as written in a config file.
///
/// Kept as a wide signed value so an out-of-range entry survives loading and
/// can be reported against the pattern that declares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(pub i64);

impl TimeOfDay {
    pub fn minutes(&self) -> i64 {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        (0..i64::from(MINUTES_PER_DAY)).contains(&self.0)
    }
}

impl From<u16> for TimeOfDay {
    fn from(minutes: u16) -> Self {
        TimeOfDay(i64::from(minutes))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct TimeOfDayVisitor;

        impl<'de> Visitor<'de> for TimeOfDayVisitor {
            type Value = TimeOfDay;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("minutes since midnight or an \"HH:MM\" string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<TimeOfDay, E> {
                Ok(TimeOfDay(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<TimeOfDay, E> {
                i64::try_from(v)
                    .map(TimeOfDay)
                    .map_err(|_| E::custom(format!("time {v} is too large")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<TimeOfDay, E> {
                use chrono::Timelike;

                let time = chrono::NaiveTime::parse_from_str(v.trim(), "%H:%M")
                    .map_err(|e| E::custom(format!("invalid time '{v}': {e}")))?;
                Ok(TimeOfDay(i64::from(time.hour() * 60 + time.minute())))
            }
        }

        deserializer.deserialize_any(TimeOfDayVisitor)
    }
}

/// One declared (state, start, end) entry of a pattern. `end <= start` means
/// the interval runs through midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInterval {
    pub state: ActivityState,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl RawInterval {
    pub fn new(state: ActivityState, start: u16, end: u16) -> Self {
        Self {
            state,
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn crosses_midnight(&self) -> bool {
        self.end <= self.start
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePattern {
    pub title: String,
    #[serde(default)]
    pub intervals: Vec<RawInterval>,
}

impl SchedulePattern {
    pub fn new(title: impl Into<String>, intervals: Vec<RawInterval>) -> Self {
        Self {
            title: title.into(),
            intervals,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default, deserialize_with = "unique_workdays")]
    pub workdays: BTreeSet<Weekday>,
    #[serde(default)]
    pub prev_week_night: bool,
    #[serde(default)]
    pub next_week_night: bool,
    #[serde(default)]
    pub colors: Palette,
    #[serde(default)]
    pub schedule_patterns: Vec<SchedulePattern>,
}

impl ScheduleConfig {
    pub fn is_workday(&self, day: Weekday) -> bool {
        self.workdays.contains(&day)
    }

    pub fn set_workday(&mut self, day: Weekday, on: bool) {
        if on {
            self.workdays.insert(day);
        } else {
            self.workdays.remove(&day);
        }
    }

    pub fn set_boundary_nights(&mut self, prev_week_night: bool, next_week_night: bool) {
        self.prev_week_night = prev_week_night;
        self.next_week_night = next_week_night;
    }

    pub fn set_color(&mut self, state: ActivityState, color: Color) {
        self.colors.set(state, color);
    }

    /// Pattern titles in declaration order.
    pub fn titles(&self) -> Vec<String> {
        self.schedule_patterns
            .iter()
            .map(|p| p.title.clone())
            .collect()
    }

    pub fn pattern(&self, title: &str) -> Result<&SchedulePattern> {
        self.schedule_patterns
            .iter()
            .find(|p| p.title == title)
            .ok_or_else(|| ScheduleError::PatternNotFound {
                title: title.to_string(),
                known: self.titles(),
            })
    }

    /// Checks the invariants serde cannot express. `path` is only used for
    /// error reporting.
    pub fn validate(&self, path: &Path) -> Result<()> {
        let invalid = |reason: String| ScheduleError::InvalidConfig {
            path: path.to_path_buf(),
            reason,
        };

        let mut seen = HashSet::new();
        for pattern in &self.schedule_patterns {
            if pattern.title.trim().is_empty() {
                return Err(invalid("schedule pattern with an empty title".to_string()));
            }
            if !seen.insert(pattern.title.as_str()) {
                return Err(invalid(format!(
                    "duplicate schedule pattern title '{}'",
                    pattern.title
                )));
            }
        }

        Ok(())
    }
}

fn unique_workdays<'de, D>(deserializer: D) -> std::result::Result<BTreeSet<Weekday>, D::Error>
where
    D: Deserializer<'de>,
{
    let days = Vec::<Weekday>::deserialize(deserializer)?;
    let mut set = BTreeSet::new();
    for day in days {
        if !set.insert(day) {
            return Err(de::Error::custom(format!("workday '{day}' listed twice")));
        }
    }
    Ok(set)
}
