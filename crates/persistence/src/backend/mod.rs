// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! This module isolates pool construction, connection settings, migration
//! and transaction set-up that cannot be expressed in backend-agnostic
//! Diesel DSL.
//!
//! ## Backend Support
//!
//! - `sqlite`: `SQLite` backend (default for development and testing)
//! - `mysql`: MySQL/MariaDB backend (hosts the stored procedures in production)
//!
//! All guard queries and the crew mutation live in `queries/` and
//! `mutations/` and must work across all supported backends.

pub mod mysql;
pub mod sqlite;

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::{Connection, MysqlConnection, SqliteConnection};

use crate::error::PersistenceError;

/// Pool of `SQLite` connections.
pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Pool of `MySQL`/`MariaDB` connections.
pub type MysqlPool = Pool<ConnectionManager<MysqlConnection>>;

/// Connection pool for whichever backend was selected at start-up.
#[derive(Clone)]
pub enum BackendPool {
    Sqlite(SqlitePool),
    Mysql(MysqlPool),
}

/// Trait for backend-specific operations.
///
/// Implemented for both `SqliteConnection` and `MysqlConnection` so callers
/// can verify a checked-out connection without knowing its backend.
pub trait PersistenceBackend: Connection {
    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;

    /// Runs a trivial statement to prove the connection is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    fn ping(&mut self) -> Result<(), PersistenceError> {
        self.batch_execute("SELECT 1")?;
        Ok(())
    }
}

impl PersistenceBackend for SqliteConnection {
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(self)
    }
}

impl PersistenceBackend for MysqlConnection {
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        mysql::verify_foreign_key_enforcement(self)
    }
}
