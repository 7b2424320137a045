//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Midtrans reports times as `YYYY-MM-DD HH:MM:SS` in Western Indonesia Time.
const MIDTRANS_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const MIDTRANS_UTC_OFFSET_SECS: i32 = 7 * 3600;

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parses a processor-local timestamp such as `2024-03-01 14:05:09`.
    pub fn parse_midtrans(value: &str) -> Result<Self, ValidationError> {
        let naive = NaiveDateTime::parse_from_str(value.trim(), MIDTRANS_TIME_FORMAT)
            .map_err(|e| ValidationError::invalid_format("transaction_time", e.to_string()))?;
        let offset = FixedOffset::east_opt(MIDTRANS_UTC_OFFSET_SECS)
            .ok_or_else(|| ValidationError::invalid_format("transaction_time", "bad offset"))?;
        let local = offset
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| ValidationError::invalid_format("transaction_time", "ambiguous time"))?;
        Ok(Self(local.with_timezone(&Utc)))
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn parse_midtrans_converts_from_utc_plus_seven() {
        let ts = Timestamp::parse_midtrans("2024-03-01 14:05:09").unwrap();

        assert_eq!(ts.as_datetime().day(), 1);
        assert_eq!(ts.as_datetime().hour(), 7);
        assert_eq!(ts.as_datetime().minute(), 5);
        assert_eq!(ts.as_datetime().second(), 9);
    }

    #[test]
    fn parse_midtrans_crosses_midnight_backwards() {
        let ts = Timestamp::parse_midtrans("2024-03-01 03:00:00").unwrap();

        assert_eq!(ts.as_datetime().day(), 29);
        assert_eq!(ts.as_datetime().month(), 2);
        assert_eq!(ts.as_datetime().hour(), 20);
    }

    #[test]
    fn parse_midtrans_rejects_other_formats() {
        assert!(Timestamp::parse_midtrans("2024-03-01T14:05:09Z").is_err());
        assert!(Timestamp::parse_midtrans("yesterday").is_err());
        assert!(Timestamp::parse_midtrans("").is_err());
    }

    #[test]
    fn add_days_moves_forward_and_back() {
        let ts = Timestamp::parse_midtrans("2024-03-01 07:00:00").unwrap();

        assert_eq!(ts.add_days(30).as_datetime().month(), 3);
        assert_eq!(ts.add_days(30).as_datetime().day(), 31);
        assert!(ts.add_days(-1).as_datetime() < ts.as_datetime());
    }

    #[test]
    fn ordering_follows_instants() {
        let earlier = Timestamp::parse_midtrans("2024-03-01 07:00:00").unwrap();
        let later = Timestamp::parse_midtrans("2024-03-01 07:00:01").unwrap();

        assert!(later > earlier);
        assert_eq!(earlier.max(later), later);
    }

    #[test]
    fn timestamp_serializes_to_json() {
        let dt = DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let ts = Timestamp::from_datetime(dt);

        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.contains("2024-01-15"));
    }
}
