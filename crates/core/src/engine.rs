// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::StoreError;
use airsim_domain::{Decimal, Time, format_time_of_day};

/// A named state-changing operation of the simulation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Procedure {
    AddAirport,
    AddPerson,
    AddAirplane,
    GrantOrRevokePilotLicense,
    OfferFlight,
    AssignPilot,
    FlightTakeoff,
    FlightLanding,
    PassengersBoard,
    PassengersDisembark,
    RecycleCrew,
    RetireFlight,
    SimulationCycle,
}

impl Procedure {
    /// Every procedure, in the order the simulation documents them.
    pub const ALL: [Self; 13] = [
        Self::AddAirport,
        Self::AddPerson,
        Self::AddAirplane,
        Self::GrantOrRevokePilotLicense,
        Self::OfferFlight,
        Self::AssignPilot,
        Self::FlightTakeoff,
        Self::FlightLanding,
        Self::PassengersBoard,
        Self::PassengersDisembark,
        Self::RecycleCrew,
        Self::RetireFlight,
        Self::SimulationCycle,
    ];

    /// The stored procedure name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AddAirport => "add_airport",
            Self::AddPerson => "add_person",
            Self::AddAirplane => "add_airplane",
            Self::GrantOrRevokePilotLicense => "grant_or_revoke_pilot_license",
            Self::OfferFlight => "offer_flight",
            Self::AssignPilot => "assign_pilot",
            Self::FlightTakeoff => "flight_takeoff",
            Self::FlightLanding => "flight_landing",
            Self::PassengersBoard => "passengers_board",
            Self::PassengersDisembark => "passengers_disembark",
            Self::RecycleCrew => "recycle_crew",
            Self::RetireFlight => "retire_flight",
            Self::SimulationCycle => "simulation_cycle",
        }
    }

    /// Number of positional arguments the procedure takes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::AddAirport => 6,
            Self::AddPerson => 8,
            Self::AddAirplane => 9,
            Self::GrantOrRevokePilotLicense | Self::AssignPilot => 2,
            Self::OfferFlight => 7,
            Self::FlightTakeoff
            | Self::FlightLanding
            | Self::PassengersBoard
            | Self::PassengersDisembark
            | Self::RecycleCrew
            | Self::RetireFlight => 1,
            Self::SimulationCycle => 0,
        }
    }
}

impl std::fmt::Display for Procedure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One positional argument of an engine call. `None` is passed as SQL `NULL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineArg {
    Text(Option<String>),
    Int(Option<i64>),
    Bool(Option<bool>),
    Decimal(Option<Decimal>),
    Time(Option<Time>),
}

impl EngineArg {
    /// Builds a non-null text argument.
    #[must_use]
    pub fn text(value: &str) -> Self {
        Self::Text(Some(value.to_string()))
    }

    /// Builds a non-null integer argument.
    #[must_use]
    pub fn int(value: u32) -> Self {
        Self::Int(Some(i64::from(value)))
    }

    /// Returns whether this argument is SQL `NULL`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(
            self,
            Self::Text(None)
                | Self::Int(None)
                | Self::Bool(None)
                | Self::Decimal(None)
                | Self::Time(None)
        )
    }
}

impl std::fmt::Display for EngineArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(Some(value)) => write!(f, "'{value}'"),
            Self::Int(Some(value)) => write!(f, "{value}"),
            Self::Bool(Some(value)) => write!(f, "{value}"),
            Self::Decimal(Some(value)) => write!(f, "{value}"),
            Self::Time(Some(value)) => write!(f, "'{}'", format_time_of_day(*value)),
            _ => write!(f, "NULL"),
        }
    }
}

/// A fully normalized invocation of an engine procedure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCall {
    procedure: Procedure,
    arguments: Vec<EngineArg>,
}

impl EngineCall {
    /// Creates a call. The argument count must match the procedure's arity.
    #[must_use]
    pub(crate) const fn new(procedure: Procedure, arguments: Vec<EngineArg>) -> Self {
        Self {
            procedure,
            arguments,
        }
    }

    #[must_use]
    pub const fn procedure(&self) -> Procedure {
        self.procedure
    }

    /// The ordered positional arguments.
    #[must_use]
    pub fn arguments(&self) -> &[EngineArg] {
        &self.arguments
    }

    /// Renders the call as `CALL name(?, ?, ...)` with one placeholder per argument.
    #[must_use]
    pub fn placeholder_sql(&self) -> String {
        let placeholders: Vec<&str> = vec!["?"; self.arguments.len()];
        format!("CALL {}({})", self.procedure.name(), placeholders.join(", "))
    }
}

impl std::fmt::Display for EngineCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: Vec<String> = self.arguments.iter().map(ToString::to_string).collect();
        write!(f, "{}({})", self.procedure.name(), rendered.join(", "))
    }
}

/// The opaque simulation that performs every state mutation.
pub trait SimulationEngine {
    /// Runs one procedure.
    ///
    /// # Errors
    ///
    /// Returns the engine's own diagnostic if it rejects the call.
    fn invoke(&mut self, call: &EngineCall) -> Result<(), StoreError>;
}

/// The one direct mutation performed outside the engine.
pub trait CrewRoster {
    /// Moves every pilot commanding `flight_id` to `location_id` and clears
    /// their command, as one statement.
    ///
    /// Returns the number of pilots released.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    fn relocate_and_release_crew(
        &mut self,
        flight_id: &str,
        location_id: &str,
    ) -> Result<usize, StoreError>;
}
