// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::engine::{CrewRoster, SimulationEngine};
use crate::error::StoreError;
use crate::guards::{Clearance, Verdict, check};
use crate::outcome::Outcome;
use crate::repository::EntityRepository;

/// Executes a command against a store: guard, then engine, then any side mutation.
///
/// The engine is invoked only when the guard allows the command. Store and
/// engine errors are reported as `Outcome::EngineFailure`. The caller owns
/// the transaction and must commit only when `Outcome::commits` is true.
///
/// # Arguments
///
/// * `store` - Repository, engine and crew roster, all bound to one transaction
/// * `command` - The normalized command
pub fn execute<S>(store: &mut S, command: &Command) -> Outcome
where
    S: EntityRepository + SimulationEngine + CrewRoster,
{
    match try_execute(store, command) {
        Ok(outcome) => outcome,
        Err(err) => Outcome::EngineFailure(err.to_string()),
    }
}

fn try_execute<S>(store: &mut S, command: &Command) -> Result<Outcome, StoreError>
where
    S: EntityRepository + SimulationEngine + CrewRoster,
{
    let clearance: Clearance = match check(store, command)? {
        Verdict::Allow(clearance) => clearance,
        Verdict::Deny(denial) => return Ok(Outcome::Denied(denial)),
    };

    store.invoke(&command.engine_call())?;

    match clearance {
        Clearance::Proceed => Ok(Outcome::Success),
        Clearance::Understaffed(shortfall) => Ok(Outcome::SuccessDegraded(shortfall)),
        Clearance::RecycleCrew(relocation) => {
            store.relocate_and_release_crew(
                &relocation.flight_id,
                &relocation.arrival_location_id,
            )?;
            Ok(Outcome::Success)
        }
    }
}
