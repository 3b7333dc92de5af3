// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Incident reports attached to visits.
//!
//! Incidents follow the facility's 5W2H form: what happened, why, where,
//! who was involved, how it happened, and (optionally) how much it cost.
//! An incident references a visit but never mutates it.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Maximum number of attachment descriptors per incident.
pub const MAX_INCIDENT_ATTACHMENTS: usize = 5;

/// A 5W2H-structured incident report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentReport {
    /// What happened.
    pub what: String,
    /// Why it happened.
    pub why: String,
    /// Where it happened.
    pub location: String,
    /// Who was involved.
    pub who: String,
    /// How it happened.
    pub how: String,
    /// How much it cost, as free text. Optional.
    pub how_much: Option<String>,
}

impl IncidentReport {
    /// Creates a new `IncidentReport`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingField` if any of the five mandatory
    /// 5W2H fields is empty.
    pub fn new(
        what: &str,
        why: &str,
        location: &str,
        who: &str,
        how: &str,
        how_much: Option<String>,
    ) -> Result<Self, DomainError> {
        if what.trim().is_empty() {
            return Err(DomainError::MissingField("what"));
        }
        if why.trim().is_empty() {
            return Err(DomainError::MissingField("why"));
        }
        if location.trim().is_empty() {
            return Err(DomainError::MissingField("where"));
        }
        if who.trim().is_empty() {
            return Err(DomainError::MissingField("who"));
        }
        if how.trim().is_empty() {
            return Err(DomainError::MissingField("how"));
        }
        Ok(Self {
            what: what.to_string(),
            why: why.to_string(),
            location: location.to_string(),
            who: who.to_string(),
            how: how.to_string(),
            how_much,
        })
    }
}

/// A descriptor of a file attached to an incident.
///
/// Only metadata is recorded; binary storage is handled outside the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentDescriptor {
    /// The original file name.
    pub file_name: String,
    /// The URL the stored file is reachable at.
    pub url: String,
    /// The MIME type reported at upload time.
    pub mime_type: String,
}

/// Validates the attachment count for an incident.
///
/// # Errors
///
/// Returns `DomainError::TooManyAttachments` if more than
/// [`MAX_INCIDENT_ATTACHMENTS`] descriptors are supplied.
pub const fn validate_attachment_count(count: usize) -> Result<(), DomainError> {
    if count > MAX_INCIDENT_ATTACHMENTS {
        Err(DomainError::TooManyAttachments {
            count,
            max: MAX_INCIDENT_ATTACHMENTS,
        })
    } else {
        Ok(())
    }
}
