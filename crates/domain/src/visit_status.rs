// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Visit status tracking.
//!
//! This module defines the operational lifecycle states of a dock visit.
//! Status changes are operator-initiated only; the system never advances
//! a visit based on time alone.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Operational lifecycle states of a dock visit.
///
/// The wire and persistence representation uses the facility's historical
/// Spanish literals (see [`VisitStatus::as_str`]); the exact casing must be
/// preserved for compatibility with the surrounding system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum VisitStatus {
    /// Booked, vehicle not yet at the facility.
    #[default]
    Pending,
    /// Vehicle has arrived at the gate.
    Arrived,
    /// Unloading at the dock has started.
    Unloading,
    /// Unloading is complete.
    Finished,
    /// Vehicle has left the facility.
    Departed,
}

impl VisitStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Arrived,
        Self::Unloading,
        Self::Finished,
        Self::Departed,
    ];

    /// Returns the wire/persistence representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDIENTE",
            Self::Arrived => "LLEGO",
            Self::Unloading => "DESCARGANDO",
            Self::Finished => "FINALIZADO",
            Self::Departed => "RETIRADO",
        }
    }

    /// Parses a status from its wire representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidVisitStatus` if the string is not a
    /// known status literal.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "PENDIENTE" => Ok(Self::Pending),
            "LLEGO" => Ok(Self::Arrived),
            "DESCARGANDO" => Ok(Self::Unloading),
            "FINALIZADO" => Ok(Self::Finished),
            "RETIRADO" => Ok(Self::Departed),
            _ => Err(DomainError::InvalidVisitStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl FromStr for VisitStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
