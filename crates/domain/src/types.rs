// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// A validated vehicle plate.
///
/// Plates are exactly 6 ASCII alphanumeric characters. The value is stored
/// exactly as entered; no case normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Plate {
    /// The plate value (exactly 6 alphanumeric characters).
    value: String,
}

impl Plate {
    /// Creates a new `Plate`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPlate` if the value is not exactly
    /// 6 ASCII alphanumeric characters.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        if value.len() == 6 && value.chars().all(|c| c.is_ascii_alphanumeric()) {
            Ok(Self {
                value: value.to_string(),
            })
        } else {
            Err(DomainError::InvalidPlate {
                plate: value.to_string(),
            })
        }
    }

    /// Returns the plate value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Vehicle and driver details for a booked visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleDetails {
    /// The vehicle plate.
    pub plate: Plate,
    /// The driver's full name.
    pub driver_name: String,
    /// The driver's national identity document number.
    pub driver_national_id: String,
    /// Names of accompanying persons, in the order given.
    pub companions: Vec<String>,
}

impl VehicleDetails {
    /// Creates new `VehicleDetails`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingField` if the driver name or national
    /// id is empty.
    pub fn new(
        plate: Plate,
        driver_name: &str,
        driver_national_id: &str,
        companions: Vec<String>,
    ) -> Result<Self, DomainError> {
        if driver_name.trim().is_empty() {
            return Err(DomainError::MissingField("driver_name"));
        }
        if driver_national_id.trim().is_empty() {
            return Err(DomainError::MissingField("driver_national_id"));
        }
        Ok(Self {
            plate,
            driver_name: driver_name.to_string(),
            driver_national_id: driver_national_id.to_string(),
            companions,
        })
    }
}

/// Vehicle assignment state of a visit.
///
/// A direct booking carries its vehicle and driver details from the start.
/// A confirmation-pending booking defers them until an operator confirms,
/// which this sum type makes structural: a `Deferred` visit has no plate or
/// driver fields to misuse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleAssignment {
    /// Details deferred until operator confirmation.
    Deferred,
    /// Details recorded.
    Assigned(VehicleDetails),
}

impl VehicleAssignment {
    /// Returns true if the visit still requires operator confirmation.
    #[must_use]
    pub const fn requires_confirmation(&self) -> bool {
        matches!(self, Self::Deferred)
    }

    /// Returns the vehicle details if assigned.
    #[must_use]
    pub const fn details(&self) -> Option<&VehicleDetails> {
        match self {
            Self::Deferred => None,
            Self::Assigned(details) => Some(details),
        }
    }
}

/// A carrier: the trucking/logistics company fulfilling deliveries.
///
/// Carriers are identified by their tax id, which is unique across the
/// registry; the numeric id is assigned by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carrier {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the carrier has not been persisted yet.
    carrier_id: Option<i64>,
    /// The carrier's display name.
    name: String,
    /// The carrier's tax id (unique).
    tax_id: String,
}

impl Carrier {
    /// Creates a new `Carrier` without a persisted ID.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingField` if the name or tax id is empty.
    pub fn new(name: &str, tax_id: &str) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::MissingField("name"));
        }
        if tax_id.trim().is_empty() {
            return Err(DomainError::MissingField("tax_id"));
        }
        Ok(Self {
            carrier_id: None,
            name: name.to_string(),
            tax_id: tax_id.to_string(),
        })
    }

    /// Creates a `Carrier` with an existing persisted ID.
    #[must_use]
    pub fn with_id(carrier_id: i64, name: &str, tax_id: &str) -> Self {
        Self {
            carrier_id: Some(carrier_id),
            name: name.to_string(),
            tax_id: tax_id.to_string(),
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn carrier_id(&self) -> Option<i64> {
        self.carrier_id
    }

    /// Returns the carrier's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the carrier's tax id.
    #[must_use]
    pub fn tax_id(&self) -> &str {
        &self.tax_id
    }
}

/// A tenant: the facility occupant requesting deliveries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the tenant has not been persisted yet.
    tenant_id: Option<i64>,
    /// The tenant's trade (commercial) name.
    trade_name: String,
    /// The tenant's registered legal name.
    legal_name: String,
    /// The tenant's tax id (unique).
    tax_id: String,
}

impl Tenant {
    /// Creates a new `Tenant` without a persisted ID.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingField` if any of the names or the tax
    /// id is empty.
    pub fn new(trade_name: &str, legal_name: &str, tax_id: &str) -> Result<Self, DomainError> {
        if trade_name.trim().is_empty() {
            return Err(DomainError::MissingField("trade_name"));
        }
        if legal_name.trim().is_empty() {
            return Err(DomainError::MissingField("legal_name"));
        }
        if tax_id.trim().is_empty() {
            return Err(DomainError::MissingField("tax_id"));
        }
        Ok(Self {
            tenant_id: None,
            trade_name: trade_name.to_string(),
            legal_name: legal_name.to_string(),
            tax_id: tax_id.to_string(),
        })
    }

    /// Creates a `Tenant` with an existing persisted ID.
    #[must_use]
    pub fn with_id(tenant_id: i64, trade_name: &str, legal_name: &str, tax_id: &str) -> Self {
        Self {
            tenant_id: Some(tenant_id),
            trade_name: trade_name.to_string(),
            legal_name: legal_name.to_string(),
            tax_id: tax_id.to_string(),
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn tenant_id(&self) -> Option<i64> {
        self.tenant_id
    }

    /// Returns the tenant's trade name.
    #[must_use]
    pub fn trade_name(&self) -> &str {
        &self.trade_name
    }

    /// Returns the tenant's legal name.
    #[must_use]
    pub fn legal_name(&self) -> &str {
        &self.legal_name
    }

    /// Returns the tenant's tax id.
    #[must_use]
    pub fn tax_id(&self) -> &str {
        &self.tax_id
    }
}
