use crate::shared::entity::{Entity, ID};
use chrono::prelude::*;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// A recurring delivery instruction: summarize the rows of one external
/// database into an HTML table and email it to `recipient` every time
/// `time_of_day` falls within the due window.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub id: ID,
    pub user_id: ID,
    /// Identifier of the external database to summarize
    pub source_id: String,
    pub recipient: String,
    pub frequency: Frequency,
    pub time_of_day: TimeOfDay,
    pub timezone: Tz,
    pub start_date: NaiveDate,
    /// Inclusive. A schedule past its end date is not due, but it is
    /// never deleted automatically.
    pub end_date: Option<NaiveDate>,
    pub status: ScheduleStatus,
    pub created_at: DateTime<Utc>,
}

impl Schedule {
    pub fn new(
        user_id: ID,
        source_id: String,
        recipient: String,
        frequency: Frequency,
        time_of_day: TimeOfDay,
        timezone: &Tz,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Default::default(),
            user_id,
            source_id,
            recipient,
            frequency,
            time_of_day,
            timezone: timezone.to_owned(),
            start_date,
            end_date: None,
            status: ScheduleStatus::Active,
            created_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ScheduleStatus::Active
    }

    /// Whether `date` lies within the schedule's calendar date range.
    /// Dates are compared as naive calendar dates, no timezone
    /// conversion is applied to the date fields.
    pub fn date_range_contains(&self, date: NaiveDate) -> bool {
        if self.start_date > date {
            return false;
        }
        match self.end_date {
            Some(end) => end >= date,
            None => true,
        }
    }
}

impl Entity for Schedule {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Active,
    Paused,
}

impl Display for ScheduleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Paused => write!(f, "paused"),
        }
    }
}

impl FromStr for ScheduleStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            _ => Err(anyhow::anyhow!("Invalid schedule status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Custom,
}

impl Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Custom => "custom",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Frequency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "custom" => Ok(Self::Custom),
            _ => Err(anyhow::anyhow!("Invalid frequency: {}", s)),
        }
    }
}

/// Local time of day with minute granularity, rendered as `HH:MM`.
/// The ordering matches the lexicographic ordering of the `HH:MM`
/// string representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay {
    hours: u32,
    minutes: u32,
}

#[derive(Error, Debug)]
#[error("Invalid time of day: {0}, expected HH:MM between 00:00 and 23:59")]
pub struct InvalidTimeOfDayError(pub String);

impl TimeOfDay {
    pub fn new(hours: u32, minutes: u32) -> Result<Self, InvalidTimeOfDayError> {
        if hours > 23 || minutes > 59 {
            return Err(InvalidTimeOfDayError(format!("{}:{}", hours, minutes)));
        }
        Ok(Self { hours, minutes })
    }

    pub fn minutes_from_midnight(&self) -> i64 {
        self.hours as i64 * 60 + self.minutes as i64
    }

    pub fn from_minutes_of_day(minutes: i64) -> Self {
        let minutes = minutes.rem_euclid(24 * 60);
        Self {
            hours: (minutes / 60) as u32,
            minutes: (minutes % 60) as u32,
        }
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(t: NaiveTime) -> Self {
        Self {
            hours: t.hour(),
            minutes: t.minute(),
        }
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

impl FromStr for TimeOfDay {
    type Err = InvalidTimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || InvalidTimeOfDayError(s.to_string());
        let (hours, minutes) = match s.split_once(':') {
            Some((h, m)) if h.len() == 2 && m.len() == 2 => (
                h.parse::<u32>().map_err(|_| malformed())?,
                m.parse::<u32>().map_err(|_| malformed())?,
            ),
            _ => return Err(malformed()),
        };
        Self::new(hours, minutes).map_err(|_| malformed())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
