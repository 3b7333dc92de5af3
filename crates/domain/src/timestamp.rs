// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Timestamp parsing and formatting.
//!
//! All timestamps are persisted as UTC ISO 8601 strings. Normalizing the
//! offset and the format means stored values compare lexicographically in
//! chronological order, which the range queries rely on.

use crate::error::DomainError;
use time::format_description::well_known::Iso8601;
use time::{OffsetDateTime, UtcOffset};

/// Parses an ISO 8601 timestamp.
///
/// # Errors
///
/// Returns `DomainError::TimestampParseError` if the string is not a valid
/// ISO 8601 timestamp.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, DomainError> {
    OffsetDateTime::parse(value, &Iso8601::DEFAULT).map_err(|e| DomainError::TimestampParseError {
        value: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a timestamp as a UTC ISO 8601 string for persistence or the wire.
///
/// # Errors
///
/// Returns `DomainError::TimestampFormatError` if formatting fails.
pub fn format_timestamp(instant: OffsetDateTime) -> Result<String, DomainError> {
    instant
        .to_offset(UtcOffset::UTC)
        .format(&Iso8601::DEFAULT)
        .map_err(|e| DomainError::TimestampFormatError {
            error: e.to_string(),
        })
}
