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

//! Transition guards in front of the simulation engine.
//!
//! A `Command` is checked against an `EntityRepository`; only when the guard
//! allows it does the `SimulationEngine` run. `execute` ties the steps
//! together and reports an `Outcome`.

mod apply;
mod command;
mod engine;
mod error;
pub mod guards;
mod outcome;
mod repository;

#[cfg(test)]
mod tests;

pub use apply::execute;
pub use command::Command;
pub use engine::{CrewRoster, EngineArg, EngineCall, Procedure, SimulationEngine};
pub use error::StoreError;
pub use guards::{Clearance, CrewRelocation, Verdict};
pub use outcome::{Denial, Outcome, StaffingShortfall};
pub use repository::EntityRepository;
