//! Identifiers exchanged with the server

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The numeric id of a calendar.
///
/// The hidden `cal_id` field is free text, so this never fails to build: anything
/// that is not an integer becomes [`CalendarId::INVALID`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarId(i64);

impl CalendarId {
    /// The id sent when no valid calendar is known. The server rejects it.
    pub const INVALID: CalendarId = CalendarId(0);

    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Parse a calendar id, degrading to [`CalendarId::INVALID`] on malformed input
    pub fn parse_lenient(text: &str) -> Self {
        match text.trim().parse::<i64>() {
            Ok(id) => Self(id),
            Err(_) => {
                log::debug!("{:?} is not a calendar id, using {}", text, Self::INVALID);
                Self::INVALID
            }
        }
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl Display for CalendarId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}


/// Identifies the week being displayed.
///
/// The server uses the date of the first day (`YYYY-MM-DD`), but this is forwarded verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekMarker {
    marker: String,
}

impl WeekMarker {
    pub fn as_str(&self) -> &str {
        &self.marker
    }

    pub fn is_empty(&self) -> bool {
        self.marker.is_empty()
    }

    /// The first day of the week, if the marker is a `YYYY-MM-DD` date
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.marker, "%Y-%m-%d").ok()
    }
}

impl From<String> for WeekMarker {
    fn from(marker: String) -> Self {
        Self { marker }
    }
}

impl From<&str> for WeekMarker {
    fn from(marker: &str) -> Self {
        Self { marker: marker.to_string() }
    }
}

impl From<NaiveDate> for WeekMarker {
    fn from(date: NaiveDate) -> Self {
        Self { marker: date.format("%Y-%m-%d").to_string() }
    }
}

impl Display for WeekMarker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.marker)
    }
}


/// A server-assigned task id
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl FromStr for TaskId {
    type Err = std::num::ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_id_degrades_to_invalid() {
        assert_eq!(CalendarId::parse_lenient("42"), CalendarId::new(42));
        assert_eq!(CalendarId::parse_lenient(" 7 "), CalendarId::new(7));
        assert_eq!(CalendarId::parse_lenient(""), CalendarId::INVALID);
        assert_eq!(CalendarId::parse_lenient("12abc"), CalendarId::INVALID);
        assert_eq!(CalendarId::parse_lenient("none"), CalendarId::INVALID);
        assert!(CalendarId::INVALID.is_valid() == false);
    }

    #[test]
    fn week_marker_dates() {
        let week = WeekMarker::from("2021-11-29");
        assert_eq!(week.date(), NaiveDate::from_ymd_opt(2021, 11, 29));
        assert_eq!(WeekMarker::from("next monday").date(), None);

        let from_date = WeekMarker::from(NaiveDate::from_ymd_opt(2022, 1, 3).unwrap());
        assert_eq!(from_date.as_str(), "2022-01-03");
    }

    #[test]
    fn task_id_serde() {
        let id: TaskId = serde_json::from_str("12").unwrap();
        assert_eq!(id, TaskId::new(12));
        assert_eq!("12".parse::<TaskId>().unwrap(), id);
        assert_eq!(serde_json::to_string(&id).unwrap(), "12");
    }
}
