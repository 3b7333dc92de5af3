// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was missing or empty.
    MissingField(&'static str),
    /// The booking terms were not accepted.
    TermsNotAccepted,
    /// The vehicle plate does not match the required shape.
    InvalidPlate {
        /// The rejected plate value.
        plate: String,
    },
    /// The visit status string is not one of the known statuses.
    InvalidVisitStatus {
        /// The rejected status value.
        status: String,
    },
    /// Failed to parse a timestamp from a string.
    TimestampParseError {
        /// The invalid timestamp string.
        value: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to format a timestamp for persistence or the wire.
    TimestampFormatError {
        /// The formatting error message.
        error: String,
    },
    /// Too many attachments were supplied for an incident.
    TooManyAttachments {
        /// The number of attachments supplied.
        count: usize,
        /// The maximum permitted.
        max: usize,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Required field '{field}' is missing"),
            Self::TermsNotAccepted => {
                write!(f, "The booking terms must be accepted before scheduling")
            }
            Self::InvalidPlate { plate } => {
                write!(
                    f,
                    "Invalid plate '{plate}': must be exactly 6 alphanumeric characters"
                )
            }
            Self::InvalidVisitStatus { status } => {
                write!(f, "Unknown visit status: '{status}'")
            }
            Self::TimestampParseError { value, error } => {
                write!(f, "Failed to parse timestamp '{value}': {error}")
            }
            Self::TimestampFormatError { error } => {
                write!(f, "Failed to format timestamp: {error}")
            }
            Self::TooManyAttachments { count, max } => {
                write!(f, "Too many attachments: {count} supplied, at most {max} allowed")
            }
        }
    }
}

impl std::error::Error for DomainError {}
