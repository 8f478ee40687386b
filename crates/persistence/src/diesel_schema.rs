// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

// Only the columns read or written by this crate are declared. `passenger.funds`
// and `flight.next_time` are owned by the stored procedures.

diesel::table! {
    location (location_id) {
        location_id -> Text,
    }
}

diesel::table! {
    airline (airline_id) {
        airline_id -> Text,
        revenue -> Nullable<Integer>,
    }
}

diesel::table! {
    airport (airport_id) {
        airport_id -> Text,
        airport_name -> Text,
        city -> Text,
        state -> Nullable<Text>,
        country -> Text,
        location_id -> Nullable<Text>,
    }
}

diesel::table! {
    person (person_id) {
        person_id -> Text,
        first_name -> Text,
        last_name -> Nullable<Text>,
        location_id -> Text,
    }
}

diesel::table! {
    pilot (person_id) {
        person_id -> Text,
        tax_id -> Text,
        experience -> Integer,
        commanding_flight -> Nullable<Text>,
    }
}

diesel::table! {
    pilot_licenses (person_id, license) {
        person_id -> Text,
        license -> Text,
    }
}

diesel::table! {
    passenger (person_id) {
        person_id -> Text,
        miles -> Integer,
    }
}

diesel::table! {
    airplane (airline_id, tail_num) {
        airline_id -> Text,
        tail_num -> Text,
        seat_capacity -> Integer,
        speed -> Integer,
        location_id -> Nullable<Text>,
        plane_type -> Nullable<Text>,
        maintained -> Nullable<Bool>,
        model -> Nullable<Text>,
        neo -> Bool,
    }
}

diesel::table! {
    leg (leg_id) {
        leg_id -> Text,
        distance -> Integer,
        departure -> Text,
        arrival -> Text,
    }
}

diesel::table! {
    route (route_id) {
        route_id -> Text,
    }
}

diesel::table! {
    route_path (route_id, sequence) {
        route_id -> Text,
        leg_id -> Text,
        sequence -> Integer,
    }
}

diesel::table! {
    flight (flight_id) {
        flight_id -> Text,
        route_id -> Text,
        support_airline -> Nullable<Text>,
        support_tail -> Nullable<Text>,
        progress -> Integer,
        airplane_status -> Text,
        cost -> Nullable<Integer>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    airline,
    airplane,
    airport,
    flight,
    leg,
    location,
    passenger,
    person,
    pilot,
    pilot_licenses,
    route,
    route_path,
);
