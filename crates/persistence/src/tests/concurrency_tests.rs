// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Requests racing on a shared file database.
//!
//! Each request holds its own pooled connection; the immediate transaction
//! makes the guard and the procedure call atomic with respect to the other
//! request.

use std::sync::{Arc, Barrier};

use airsim::{Command, Outcome};
use airsim_domain::{AirplaneKey, Time};

use super::initialization_tests::TempDatabase;
use super::{RecordingDriver, SEED_SQL};
use crate::Persistence;

fn seeded_file_database(database: &TempDatabase, driver: Arc<RecordingDriver>) -> Persistence {
    let persistence: Persistence = Persistence::new_with_file(&database.path, 4)
        .unwrap()
        .with_driver(driver);
    persistence.execute_sql_script(SEED_SQL).unwrap();
    persistence
}

fn race(persistence: &Persistence, commands: [Command; 2]) -> Vec<Outcome> {
    let barrier: Barrier = Barrier::new(2);
    std::thread::scope(|scope| {
        let handles: Vec<_> = commands
            .iter()
            .map(|command| {
                let barrier: &Barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    persistence.run_command(command).unwrap()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    })
}

#[test]
fn test_racing_assignments_of_one_pilot_admit_exactly_one() {
    let database: TempDatabase = TempDatabase::new("race_pilot");
    let driver: Arc<RecordingDriver> = Arc::new(RecordingDriver::default());
    let persistence: Persistence = seeded_file_database(&database, Arc::clone(&driver));

    let command = || Command::AssignPilot {
        flight_id: String::from("un_38"),
        person_id: String::from("p2"),
    };
    let outcomes: Vec<Outcome> = race(&persistence, [command(), command()]);

    let successes: usize = outcomes.iter().filter(|o| **o == Outcome::Success).count();
    assert_eq!(successes, 1, "{outcomes:?}");
    assert!(outcomes.iter().any(
        |o| matches!(o, Outcome::Denied(denial) if denial.rule == "pilot_uncommanding")
    ));
    assert_eq!(driver.calls().len(), 1);
}

#[test]
fn test_racing_pilots_for_one_flight_both_commit() {
    let database: TempDatabase = TempDatabase::new("race_crew");
    let driver: Arc<RecordingDriver> = Arc::new(RecordingDriver::default());
    let persistence: Persistence = seeded_file_database(&database, Arc::clone(&driver));

    let outcomes: Vec<Outcome> = race(
        &persistence,
        [
            Command::AssignPilot {
                flight_id: String::from("un_38"),
                person_id: String::from("p2"),
            },
            Command::AssignPilot {
                flight_id: String::from("un_38"),
                person_id: String::from("p3"),
            },
        ],
    );

    assert!(outcomes.iter().all(|o| *o == Outcome::Success), "{outcomes:?}");
    for person_id in ["p2", "p3"] {
        let pilot = persistence.pilot(person_id).unwrap().unwrap();
        assert_eq!(pilot.commanding_flight.as_deref(), Some("un_38"));
    }
}

#[test]
fn test_racing_offers_for_one_support_airplane_admit_exactly_one() {
    let database: TempDatabase = TempDatabase::new("race_support");
    let driver: Arc<RecordingDriver> = Arc::new(RecordingDriver::default());
    let persistence: Persistence = seeded_file_database(&database, Arc::clone(&driver));

    let offer = |flight_id: &str| Command::OfferFlight {
        flight_id: flight_id.to_string(),
        route_id: String::from("tour"),
        progress: 0,
        cost: 90,
        next_time: Time::from_hms(14, 0, 0).unwrap(),
        support: Some(AirplaneKey::new("Delta", "n110jn")),
    };
    let outcomes: Vec<Outcome> = race(&persistence, [offer("dl_61"), offer("dl_62")]);

    let successes: usize = outcomes.iter().filter(|o| **o == Outcome::Success).count();
    assert_eq!(successes, 1, "{outcomes:?}");
    assert!(outcomes.iter().any(
        |o| matches!(o, Outcome::Denied(denial) if denial.rule == "support_airplane_available")
    ));
    assert_eq!(driver.calls().len(), 1);

    let offered: Vec<String> = ["dl_61", "dl_62"]
        .into_iter()
        .filter(|flight_id| persistence.flight(flight_id).unwrap().is_some())
        .map(String::from)
        .collect();
    assert_eq!(offered.len(), 1, "{offered:?}");
}
