// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::engine::{EngineArg, EngineCall, Procedure};
use airsim_domain::{AirplaneKey, PersonRole, Time};

/// A normalized request to change simulation state.
///
/// Every field has already passed the field-level validation rules; what
/// remains to check is how the request relates to stored data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register a new airport.
    AddAirport {
        /// Three-character airport identifier.
        airport_id: String,
        /// The airport's name.
        name: String,
        /// City served.
        city: String,
        /// State or province, if any.
        state: Option<String>,
        /// Country.
        country: String,
        /// Location the airport claims.
        location_id: String,
    },
    /// Register a new pilot or passenger.
    AddPerson {
        /// Person identifier.
        person_id: String,
        /// First name.
        first_name: String,
        /// Last name, if any.
        last_name: Option<String>,
        /// Where the person starts.
        location_id: String,
        /// Pilot or passenger data.
        role: PersonRole,
    },
    /// Register a new airplane.
    AddAirplane {
        /// Airline plus tail number.
        key: AirplaneKey,
        /// Model designation.
        model: Option<String>,
        /// Seat capacity, greater than 0.
        seat_capacity: u32,
        /// Free-text plane type.
        plane_type: Option<String>,
        /// Speed, greater than 0.
        speed: u32,
        /// Maintenance flag, if stated.
        maintained: Option<bool>,
        /// Whether the airplane is a neo variant.
        neo: bool,
        /// Location the airplane claims.
        location_id: String,
    },
    /// Toggle a pilot license.
    GrantOrRevokePilotLicense {
        /// The pilot.
        person_id: String,
        /// License type to toggle.
        license_type: String,
    },
    /// Offer a new flight along a route.
    OfferFlight {
        flight_id: String,
        route_id: String,
        /// Index of the first unflown leg.
        progress: u32,
        cost: u32,
        next_time: Time,
        /// Supporting airplane, if one is assigned up front.
        support: Option<AirplaneKey>,
    },
    /// Put a pilot in command of a flight.
    AssignPilot { flight_id: String, person_id: String },
    FlightTakeoff { flight_id: String },
    FlightLanding { flight_id: String },
    PassengersBoard { flight_id: String },
    PassengersDisembark { flight_id: String },
    /// Release the crew of a completed flight.
    RecycleCrew { flight_id: String },
    RetireFlight { flight_id: String },
    /// Advance the whole simulation by one step.
    SimulationCycle,
}

fn text_or_null(value: Option<&str>) -> EngineArg {
    EngineArg::Text(value.map(ToString::to_string))
}

impl Command {
    /// The engine procedure this command maps to.
    #[must_use]
    pub const fn procedure(&self) -> Procedure {
        match self {
            Self::AddAirport { .. } => Procedure::AddAirport,
            Self::AddPerson { .. } => Procedure::AddPerson,
            Self::AddAirplane { .. } => Procedure::AddAirplane,
            Self::GrantOrRevokePilotLicense { .. } => Procedure::GrantOrRevokePilotLicense,
            Self::OfferFlight { .. } => Procedure::OfferFlight,
            Self::AssignPilot { .. } => Procedure::AssignPilot,
            Self::FlightTakeoff { .. } => Procedure::FlightTakeoff,
            Self::FlightLanding { .. } => Procedure::FlightLanding,
            Self::PassengersBoard { .. } => Procedure::PassengersBoard,
            Self::PassengersDisembark { .. } => Procedure::PassengersDisembark,
            Self::RecycleCrew { .. } => Procedure::RecycleCrew,
            Self::RetireFlight { .. } => Procedure::RetireFlight,
            Self::SimulationCycle => Procedure::SimulationCycle,
        }
    }

    /// The flight this command targets, if it targets one.
    #[must_use]
    pub fn flight_id(&self) -> Option<&str> {
        match self {
            Self::OfferFlight { flight_id, .. }
            | Self::AssignPilot { flight_id, .. }
            | Self::FlightTakeoff { flight_id }
            | Self::FlightLanding { flight_id }
            | Self::PassengersBoard { flight_id }
            | Self::PassengersDisembark { flight_id }
            | Self::RecycleCrew { flight_id }
            | Self::RetireFlight { flight_id } => Some(flight_id),
            _ => None,
        }
    }

    /// Builds the positional engine call for this command.
    ///
    /// Argument order follows the stored procedure signatures.
    #[must_use]
    pub fn engine_call(&self) -> EngineCall {
        let arguments: Vec<EngineArg> = match self {
            Self::AddAirport {
                airport_id,
                name,
                city,
                state,
                country,
                location_id,
            } => vec![
                EngineArg::text(airport_id),
                EngineArg::text(name),
                EngineArg::text(city),
                text_or_null(state.as_deref()),
                EngineArg::text(country),
                EngineArg::text(location_id),
            ],
            Self::AddPerson {
                person_id,
                first_name,
                last_name,
                location_id,
                role,
            } => {
                let (tax_id, experience, miles, funds) = match role {
                    PersonRole::Pilot {
                        tax_id, experience, ..
                    } => (
                        EngineArg::text(tax_id.value()),
                        EngineArg::int(*experience),
                        EngineArg::Int(None),
                        EngineArg::Decimal(None),
                    ),
                    PersonRole::Passenger { miles, funds } => (
                        EngineArg::Text(None),
                        EngineArg::Int(None),
                        EngineArg::int(*miles),
                        EngineArg::Decimal(Some(*funds)),
                    ),
                };
                vec![
                    EngineArg::text(person_id),
                    EngineArg::text(first_name),
                    text_or_null(last_name.as_deref()),
                    tax_id,
                    experience,
                    miles,
                    funds,
                    EngineArg::text(location_id),
                ]
            }
            Self::AddAirplane {
                key,
                model,
                seat_capacity,
                plane_type,
                speed,
                maintained,
                neo,
                location_id,
            } => vec![
                EngineArg::text(&key.tail_num),
                text_or_null(model.as_deref()),
                EngineArg::int(*seat_capacity),
                text_or_null(plane_type.as_deref()),
                EngineArg::int(*speed),
                EngineArg::Bool(*maintained),
                EngineArg::Bool(Some(*neo)),
                EngineArg::text(location_id),
                EngineArg::text(&key.airline_id),
            ],
            Self::GrantOrRevokePilotLicense {
                person_id,
                license_type,
            } => vec![EngineArg::text(license_type), EngineArg::text(person_id)],
            Self::OfferFlight {
                flight_id,
                route_id,
                progress,
                cost,
                next_time,
                support,
            } => vec![
                EngineArg::text(flight_id),
                EngineArg::text(route_id),
                EngineArg::int(*progress),
                EngineArg::int(*cost),
                EngineArg::Time(Some(*next_time)),
                text_or_null(support.as_ref().map(|key| key.airline_id.as_str())),
                text_or_null(support.as_ref().map(|key| key.tail_num.as_str())),
            ],
            Self::AssignPilot {
                flight_id,
                person_id,
            } => vec![EngineArg::text(flight_id), EngineArg::text(person_id)],
            Self::FlightTakeoff { flight_id }
            | Self::FlightLanding { flight_id }
            | Self::PassengersBoard { flight_id }
            | Self::PassengersDisembark { flight_id }
            | Self::RecycleCrew { flight_id }
            | Self::RetireFlight { flight_id } => vec![EngineArg::text(flight_id)],
            Self::SimulationCycle => Vec::new(),
        };

        EngineCall::new(self.procedure(), arguments)
    }
}
