//! Time ranges and shifts used by history and reporting queries.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A reporting shift.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    Afternoon,
    Night,
}

impl Shift {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Afternoon => "afternoon",
            Shift::Night => "night",
        }
    }
}

impl std::str::FromStr for Shift {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "afternoon" => Ok(Shift::Afternoon),
            "night" => Ok(Shift::Night),
            other => Err(format!("Unknown shift '{}'", other)),
        }
    }
}

/// Half-open UTC interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Build a range, rejecting empty or inverted intervals.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, String> {
        if start >= end {
            return Err(format!(
                "Range start {} must be before end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            ));
        }
        Ok(Self { start, end })
    }

    /// The UTC range covering one calendar day in the given local offset.
    pub fn local_day(date: NaiveDate, offset: FixedOffset) -> Self {
        let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
        let start = offset
            .from_local_datetime(&midnight)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&midnight));

        Self {
            start,
            end: start + Duration::days(1),
        }
    }

    /// Query parameters in the form the backend expects.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        vec![
            (
                "start".to_string(),
                self.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
            (
                "end".to_string(),
                self.end.to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
        ]
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_day_converts_to_utc() {
        let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        let range = DateRange::local_day(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(), ist);

        assert_eq!(
            range.query_pairs(),
            vec![
                ("start".to_string(), "2026-02-28T18:30:00Z".to_string()),
                ("end".to_string(), "2026-03-01T18:30:00Z".to_string()),
            ]
        );
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let now = Utc::now();
        assert!(DateRange::new(now, now).is_err());
        assert!(DateRange::new(now, now - Duration::hours(1)).is_err());
        assert!(DateRange::new(now - Duration::hours(1), now).is_ok());
    }

    #[test]
    fn test_half_open() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let range = DateRange::new(start, start + Duration::days(1)).unwrap();
        assert!(range.contains(start));
        assert!(!range.contains(range.end));
    }

    #[test]
    fn test_shift_parsing() {
        assert_eq!("Night".parse::<Shift>(), Ok(Shift::Night));
        assert!("morning".parse::<Shift>().is_err());
    }
}
