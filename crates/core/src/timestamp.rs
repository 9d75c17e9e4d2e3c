use chrono::{DateTime, Utc};

use crate::{Event, TimestampError};

/// Parse a stored RFC 3339 timestamp (`2024-05-01T12:00:00.123Z`, offsets allowed).
pub fn parse_timestamp(raw: Option<&str>) -> Result<DateTime<Utc>, TimestampError> {
    let value = raw.map(str::trim).filter(|v| !v.is_empty()).ok_or(TimestampError::Missing)?;
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| TimestampError::Unparseable { value: value.to_owned(), source })
}

/// Lazily parse event timestamps, dropping events whose timestamp is missing or malformed.
pub fn parsed_timestamps<'a, I>(events: I) -> impl Iterator<Item = DateTime<Utc>> + 'a
where
    I: IntoIterator<Item = &'a Event>,
    I::IntoIter: 'a,
{
    events.into_iter().filter_map(|event| match parse_timestamp(event.timestamp.as_deref()) {
        Ok(ts) => Some(ts),
        Err(e) => {
            tracing::debug!(event_id = %event.id, error = %e, "skipping event timestamp");
            None
        },
    })
}
