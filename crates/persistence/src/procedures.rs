// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Invocation of the simulation's stored procedures.
//!
//! The procedures are the simulation engine: they own every write except
//! crew relocation. They are only installed on `MySQL`/`MariaDB`, so the
//! default driver refuses to run on `SQLite`. Tests replace the driver to
//! exercise the transaction boundary without a live engine.

use airsim::{EngineArg, EngineCall};
use airsim_domain::format_time_of_day;
use diesel::mysql::Mysql;
use diesel::sql_types::{BigInt, Bool, Nullable, Text};
use diesel::{MysqlConnection, RunQueryDsl, SqliteConnection};
use tracing::debug;

use crate::error::PersistenceError;

/// Executes engine calls on a checked-out connection.
///
/// Calls always run inside the request transaction opened by
/// `Persistence::run_command`; a driver must not commit or roll back.
pub trait ProcedureDriver: Send + Sync {
    /// Runs a call on a `SQLite` connection.
    ///
    /// # Errors
    ///
    /// Returns the engine diagnostic if the call is rejected.
    fn call_sqlite(
        &self,
        conn: &mut SqliteConnection,
        call: &EngineCall,
    ) -> Result<(), PersistenceError>;

    /// Runs a call on a `MySQL` connection.
    ///
    /// # Errors
    ///
    /// Returns the engine diagnostic if the call is rejected.
    fn call_mysql(
        &self,
        conn: &mut MysqlConnection,
        call: &EngineCall,
    ) -> Result<(), PersistenceError>;
}

/// Calls the procedures installed in the database with `CALL`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredProcedures;

impl ProcedureDriver for StoredProcedures {
    fn call_sqlite(
        &self,
        _conn: &mut SqliteConnection,
        call: &EngineCall,
    ) -> Result<(), PersistenceError> {
        Err(PersistenceError::ProcedureUnavailable(format!(
            "{} requires a MySQL or MariaDB database",
            call.procedure()
        )))
    }

    fn call_mysql(
        &self,
        conn: &mut MysqlConnection,
        call: &EngineCall,
    ) -> Result<(), PersistenceError> {
        debug!(call = %call, "Calling stored procedure");

        let expected: usize = call.procedure().arity();
        if call.arguments().len() != expected {
            return Err(PersistenceError::QueryFailed(format!(
                "{} takes {expected} arguments, got {}",
                call.procedure(),
                call.arguments().len()
            )));
        }

        // NOTE: CALL is raw SQL (justified - Diesel has no stored procedure DSL).
        // Arguments are bound, never interpolated.
        let mut query = diesel::sql_query(call.placeholder_sql()).into_boxed::<Mysql>();
        for argument in call.arguments() {
            query = match argument {
                EngineArg::Text(value) => query.bind::<Nullable<Text>, _>(value.clone()),
                EngineArg::Int(value) => query.bind::<Nullable<BigInt>, _>(*value),
                EngineArg::Bool(value) => query.bind::<Nullable<Bool>, _>(*value),
                EngineArg::Decimal(value) => {
                    query.bind::<Nullable<Text>, _>(value.map(|amount| amount.to_string()))
                }
                EngineArg::Time(value) => {
                    query.bind::<Nullable<Text>, _>(value.map(format_time_of_day))
                }
            };
        }

        query.execute(conn)?;
        Ok(())
    }
}
