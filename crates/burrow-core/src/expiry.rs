use crate::error::ExpiryError;
use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::{Span, Timestamp};

type Result<T> = std::result::Result<T, ExpiryError>;

/// Default rendering of an expiry date, e.g. `2999-01-01`.
pub const DEFAULT_EXPIRY_FORMAT: &str = "%Y-%m-%d";

/// Parses, renders and shifts expiry dates.
///
/// An expiry string names a calendar day in `format`. It takes effect at the
/// start of that day in `time_zone`: a record is expired once the current
/// instant is strictly later than that point.
#[derive(Debug, Clone)]
pub struct ExpiryCalendar {
    format: String,
    time_zone: TimeZone,
}

impl ExpiryCalendar {
    /// Creates a calendar for the given strftime pattern and time zone.
    ///
    /// The pattern must carry a full calendar date; patterns that cannot
    /// round-trip a date are rejected.
    pub fn new(format: impl Into<String>, time_zone: TimeZone) -> Result<Self> {
        let calendar = Self {
            format: format.into(),
            time_zone,
        };

        let probe = jiff::civil::date(2000, 2, 29);
        let rendered = calendar.render(probe)?;
        match Date::strptime(&calendar.format, &rendered) {
            Ok(parsed) if parsed == probe => Ok(calendar),
            _ => Err(ExpiryError::Calendar(format!(
                "pattern '{}' does not round-trip a calendar date",
                calendar.format
            ))),
        }
    }

    /// Like [`ExpiryCalendar::new`], looking the zone up by IANA name.
    pub fn with_zone_name(format: impl Into<String>, zone: &str) -> Result<Self> {
        let time_zone = TimeZone::get(zone)
            .map_err(|e| ExpiryError::Calendar(format!("unknown time zone '{zone}': {e}")))?;
        Self::new(format, time_zone)
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    /// Parses an expiry string into the instant it takes effect.
    pub fn parse(&self, expiry: &str) -> Result<Timestamp> {
        let date = self.parse_date(expiry)?;
        date.to_zoned(self.time_zone.clone())
            .map(|zoned| zoned.timestamp())
            .map_err(|e| ExpiryError::Format {
                input: expiry.to_string(),
                reason: e.to_string(),
            })
    }

    /// Returns whether `now` is strictly past the expiry.
    pub fn is_expired(&self, expiry: &str, now: Timestamp) -> Result<bool> {
        Ok(now > self.parse(expiry)?)
    }

    /// Shifts an expiry string by `days` calendar days, keeping its format.
    pub fn extend(&self, expiry: &str, days: i32) -> Result<String> {
        let date = self.parse_date(expiry)?;
        let out_of_range = |e: jiff::Error| ExpiryError::OutOfRange {
            input: expiry.to_string(),
            days,
            reason: e.to_string(),
        };

        let span = Span::new().try_days(days).map_err(out_of_range)?;
        let shifted = date.checked_add(span).map_err(out_of_range)?;
        self.render(shifted)
    }

    /// Renders the expiry that lies `days` calendar days after `now`.
    pub fn days_from(&self, now: Timestamp, days: i32) -> Result<String> {
        let today = now.to_zoned(self.time_zone.clone()).date();
        let today = self.render(today)?;
        self.extend(&today, days)
    }

    fn parse_date(&self, expiry: &str) -> Result<Date> {
        Date::strptime(&self.format, expiry).map_err(|e| ExpiryError::Format {
            input: expiry.to_string(),
            reason: e.to_string(),
        })
    }

    fn render(&self, date: Date) -> Result<String> {
        jiff::fmt::strtime::format(&self.format, date)
            .map_err(|e| ExpiryError::Calendar(format!("cannot render {date}: {e}")))
    }
}

impl Default for ExpiryCalendar {
    fn default() -> Self {
        Self {
            format: DEFAULT_EXPIRY_FORMAT.to_string(),
            time_zone: TimeZone::UTC,
        }
    }
}
