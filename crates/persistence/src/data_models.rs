// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airsim_domain::{Airplane, AirplaneKey, AirplaneStatus, Flight, Pilot};
use diesel::prelude::*;
use num_traits::ToPrimitive;

use crate::diesel_schema::{airplane, flight};
use crate::error::PersistenceError;

/// Diesel Queryable struct for flight rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = flight)]
pub struct FlightRow {
    pub flight_id: String,
    pub route_id: String,
    pub support_airline: Option<String>,
    pub support_tail: Option<String>,
    pub progress: i32,
    pub airplane_status: String,
    pub cost: Option<i32>,
}

/// Diesel Queryable struct for airplane rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = airplane)]
pub struct AirplaneRow {
    pub airline_id: String,
    pub tail_num: String,
    pub seat_capacity: i32,
    pub speed: i32,
    pub location_id: Option<String>,
    pub plane_type: Option<String>,
    pub maintained: Option<bool>,
    pub model: Option<String>,
    pub neo: bool,
}

/// A pilot joined with the person row that carries their location.
#[derive(Debug, Queryable)]
pub struct PilotRow {
    pub person_id: String,
    pub location_id: String,
    pub tax_id: String,
    pub experience: i32,
    pub commanding_flight: Option<String>,
}

fn non_negative(column: &str, value: i32) -> Result<u32, PersistenceError> {
    value
        .to_u32()
        .ok_or_else(|| PersistenceError::InvalidRow(format!("{column} is negative: {value}")))
}

/// Converts a row count to `u32`, saturating on overflow.
pub fn count_to_u32(count: i64) -> u32 {
    count.to_u32().unwrap_or(u32::MAX)
}

impl TryFrom<FlightRow> for Flight {
    type Error = PersistenceError;

    fn try_from(row: FlightRow) -> Result<Self, Self::Error> {
        let airplane_status: AirplaneStatus = row
            .airplane_status
            .parse()
            .map_err(|e| PersistenceError::InvalidRow(format!("flight {}: {e}", row.flight_id)))?;

        // Both halves of the support pair must be set for the flight to have an airplane.
        let support: Option<AirplaneKey> = match (row.support_airline, row.support_tail) {
            (Some(airline_id), Some(tail_num)) => Some(AirplaneKey {
                airline_id,
                tail_num,
            }),
            _ => None,
        };

        Ok(Self {
            progress: non_negative("flight.progress", row.progress)?,
            cost: row
                .cost
                .map(|cost| non_negative("flight.cost", cost))
                .transpose()?,
            flight_id: row.flight_id,
            route_id: row.route_id,
            support,
            airplane_status,
        })
    }
}

impl TryFrom<AirplaneRow> for Airplane {
    type Error = PersistenceError;

    fn try_from(row: AirplaneRow) -> Result<Self, Self::Error> {
        Ok(Self {
            seat_capacity: non_negative("airplane.seat_capacity", row.seat_capacity)?,
            speed: non_negative("airplane.speed", row.speed)?,
            key: AirplaneKey {
                airline_id: row.airline_id,
                tail_num: row.tail_num,
            },
            location_id: row.location_id,
            plane_type: row.plane_type,
            maintained: row.maintained,
            model: row.model,
            neo: row.neo,
        })
    }
}

impl TryFrom<PilotRow> for Pilot {
    type Error = PersistenceError;

    fn try_from(row: PilotRow) -> Result<Self, Self::Error> {
        Ok(Self {
            experience: non_negative("pilot.experience", row.experience)?,
            person_id: row.person_id,
            location_id: Some(row.location_id),
            tax_id: row.tax_id,
            commanding_flight: row.commanding_flight,
        })
    }
}
