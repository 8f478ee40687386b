// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use rust_decimal::Decimal;
pub use time::Time;
pub use types::{
    Airplane, AirplaneKey, AirplaneStatus, Flight, GENERAL_LICENSE, PersonRole, Pilot, TaxId,
    is_boeing_type,
};
pub use validation::{
    determine_role, format_time_of_day, optional, pair_support_airplane, parse_flag, parse_funds,
    parse_non_negative, parse_positive, parse_tax_id, parse_time_of_day, required,
    validate_airplane_category, validate_airport_id,
};
