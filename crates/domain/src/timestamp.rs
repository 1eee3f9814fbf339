use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use ppe_portal_core::{AppError, AppResult};

/// Renders an instant as ISO-8601 UTC with millisecond precision.
#[must_use]
pub fn iso_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Renders a chosen calendar date as midnight UTC, or `now` when no date was chosen.
#[must_use]
pub fn iso_timestamp_for_date(date: Option<NaiveDate>, now: DateTime<Utc>) -> String {
    let instant = date.map_or(now, |date| date.and_time(NaiveTime::MIN).and_utc());
    iso_timestamp(instant)
}

/// Parses a `YYYY-MM-DD` form date; blank input means no date.
pub fn parse_form_date(value: &str) -> AppResult<Option<NaiveDate>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|error| AppError::Validation(format!("invalid date '{value}': {error}")))
}
