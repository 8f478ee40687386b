// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// License type a pilot needs for airplanes without a plane type.
pub const GENERAL_LICENSE: &str = "general";

/// Returns whether a free-text plane type belongs to the Boeing category.
#[must_use]
pub fn is_boeing_type(plane_type: &str) -> bool {
    plane_type.to_lowercase().contains("boeing")
}

/// Whether a flight's airplane is currently on the ground or airborne.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirplaneStatus {
    /// Parked at the location of the current leg's departure airport.
    OnGround,
    /// Flying the current leg.
    InFlight,
}

impl AirplaneStatus {
    /// Converts this status to the string stored by the simulation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OnGround => "on_ground",
            Self::InFlight => "in_flight",
        }
    }
}

impl FromStr for AirplaneStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on_ground" => Ok(Self::OnGround),
            "in_flight" => Ok(Self::InFlight),
            _ => Err(DomainError::InvalidAirplaneStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for AirplaneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Composite key of an airplane: owning airline plus tail number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AirplaneKey {
    /// The owning airline.
    pub airline_id: String,
    /// The tail number, unique within the airline.
    pub tail_num: String,
}

impl AirplaneKey {
    /// Creates a new airplane key.
    #[must_use]
    pub fn new(airline_id: &str, tail_num: &str) -> Self {
        Self {
            airline_id: airline_id.to_string(),
            tail_num: tail_num.to_string(),
        }
    }
}

impl std::fmt::Display for AirplaneKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.airline_id, self.tail_num)
    }
}

/// A validated pilot tax identifier (`###-##-####`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxId(String);

impl TaxId {
    /// Wraps an already validated tax identifier.
    ///
    /// Use `validation::parse_tax_id` for raw input.
    #[must_use]
    pub(crate) const fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    /// Returns the tax identifier as a string slice.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// The role a person plays in the simulation.
///
/// Decided once when the person is created: a person is a pilot or a
/// passenger, never both and never neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonRole {
    /// Flight crew.
    Pilot {
        /// The pilot's tax identifier.
        tax_id: TaxId,
        /// Years of experience.
        experience: u32,
        /// License types held by the pilot.
        licenses: Vec<String>,
        /// The flight this pilot currently commands, if any.
        commanding_flight: Option<String>,
    },
    /// A paying traveller.
    Passenger {
        /// Accumulated frequent flier miles.
        miles: u32,
        /// Funds available for tickets.
        funds: Decimal,
    },
}

impl PersonRole {
    /// Creates a freshly hired pilot with no licenses or assignment.
    #[must_use]
    pub const fn new_pilot(tax_id: TaxId, experience: u32) -> Self {
        Self::Pilot {
            tax_id,
            experience,
            licenses: Vec::new(),
            commanding_flight: None,
        }
    }

    /// `pilot` or `passenger`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Pilot { .. } => "pilot",
            Self::Passenger { .. } => "passenger",
        }
    }
}

/// Read model of an airplane as stored by the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airplane {
    /// Composite key.
    pub key: AirplaneKey,
    /// Number of passenger seats.
    pub seat_capacity: u32,
    /// Cruise speed.
    pub speed: u32,
    /// Where the airplane currently is.
    pub location_id: Option<String>,
    /// Free-text category, e.g. `Boeing` or `Airbus`.
    pub plane_type: Option<String>,
    /// Maintenance flag (meaningful for Boeing airplanes).
    pub maintained: Option<bool>,
    /// Model designation.
    pub model: Option<String>,
    /// Whether this is a "neo" variant.
    pub neo: bool,
}

impl Airplane {
    /// Returns whether the airplane belongs to the Boeing category.
    #[must_use]
    pub fn is_boeing(&self) -> bool {
        self.plane_type.as_deref().is_some_and(is_boeing_type)
    }

    /// Number of pilots needed to fly this airplane.
    #[must_use]
    pub fn required_pilots(&self) -> u32 {
        if self.is_boeing() { 2 } else { 1 }
    }

    /// License type a pilot must hold to command this airplane.
    #[must_use]
    pub fn license_type(&self) -> &str {
        match self.plane_type.as_deref().map(str::trim) {
            Some(plane_type) if !plane_type.is_empty() => plane_type,
            _ => GENERAL_LICENSE,
        }
    }
}

/// Read model of a flight as stored by the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    /// Flight identifier.
    pub flight_id: String,
    /// Route the flight follows.
    pub route_id: String,
    /// Airplane supporting the flight, if assigned.
    pub support: Option<AirplaneKey>,
    /// Index of the next unflown leg.
    pub progress: u32,
    /// Whether the airplane is on the ground or in flight.
    pub airplane_status: AirplaneStatus,
    /// Ticket cost.
    pub cost: Option<u32>,
}

impl Flight {
    /// Returns whether the airplane is on the ground.
    #[must_use]
    pub fn is_on_ground(&self) -> bool {
        self.airplane_status == AirplaneStatus::OnGround
    }
}

/// Read model of a pilot as stored by the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pilot {
    /// The person identifier.
    pub person_id: String,
    /// Where the pilot currently is.
    pub location_id: Option<String>,
    /// The pilot's tax identifier.
    pub tax_id: String,
    /// Years of experience.
    pub experience: u32,
    /// The flight this pilot commands, if any.
    pub commanding_flight: Option<String>,
}
