// Locations API
// Copyright 2025 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Database abstraction in terms of the operations needed by the server.
//!
//! The PostgreSQL backend is for production use and the SQLite backend exists to support unit
//! tests, so the latter is only compiled for tests.  Domain operations are free functions over
//! an `Executor`, which dispatches to whichever backend is in use.

use crate::model::{Location, LocationId, ModelError};
use async_trait::async_trait;

pub(crate) mod postgres;
#[cfg(test)]
pub(crate) mod sqlite;

/// Database errors.  Any unexpected errors that come from the database are classified as
/// `BackendError`, but errors we know about have more specific types.
#[derive(Debug, thiserror::Error, PartialEq)]
pub(crate) enum DbError {
    /// Indicates that a request to create an entry failed because it already exists.
    #[error("Already exists")]
    AlreadyExists,

    /// Catch-all error type for unexpected database errors.
    #[error("Database error: {0}")]
    BackendError(String),

    /// Indicates a failure processing the data that already exists in the database.
    #[error("Data integrity error: {0}")]
    DataIntegrityError(String),

    /// Indicates that a requested entry does not exist.
    #[error("Entity not found")]
    NotFound,

    /// Indicates that the database is not available (maybe because of too many active concurrent
    /// connections).
    #[error("Unavailable")]
    Unavailable,
}

impl From<ModelError> for DbError {
    fn from(e: ModelError) -> Self {
        DbError::DataIntegrityError(e.to_string())
    }
}

/// Result type for this module.
pub(crate) type DbResult<T> = Result<T, DbError>;

/// A database executor that can talk to multiple database implementations.
///
/// Note that this can wrap an executor that talks directly to a pool or to an open transaction.
pub(crate) enum Executor {
    /// A PostgreSQL executor.
    Postgres(postgres::PostgresExecutor),

    /// A SQLite executor.
    #[cfg(test)]
    Sqlite(sqlite::SqliteExecutor),
}

/// A wrapper for a database executor backed by an open transaction.
pub(crate) struct TxExecutor(Executor);

impl TxExecutor {
    /// Returns the executor wrapped by this transaction.
    pub(crate) fn ex(&mut self) -> &mut Executor {
        &mut self.0
    }

    /// Commits the transaction.
    pub(crate) async fn commit(self) -> DbResult<()> {
        match self.0 {
            Executor::Postgres(e) => e.commit().await,

            #[cfg(test)]
            Executor::Sqlite(e) => e.commit().await,
        }
    }
}

/// Abstraction over the database connection.
#[async_trait]
pub(crate) trait Db {
    /// Obtains an executor for direct access to the pool.
    async fn ex(&self) -> DbResult<Executor>;

    /// Begins a transaction.
    ///
    /// It is the responsibility of the caller to call `commit` on the returned executor.
    /// Otherwise the transaction is rolled back on drop.
    async fn begin(&self) -> DbResult<TxExecutor>;

    /// Closes the connection pool.
    async fn close(&self);
}

/// Initializes the schema of the database that `ex` points to.
pub(crate) async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        Executor::Postgres(ex) => postgres::init_schema(ex).await,

        #[cfg(test)]
        Executor::Sqlite(ex) => sqlite::init_schema(ex).await,
    }
}

/// Gets the location stored under `id`.
pub(crate) async fn get_location(ex: &mut Executor, id: &LocationId) -> DbResult<Location> {
    match ex {
        Executor::Postgres(ex) => postgres::get_location(ex, id).await,

        #[cfg(test)]
        Executor::Sqlite(ex) => sqlite::get_location(ex, id).await,
    }
}

/// Inserts `location` as a new record keyed by its identifier.
pub(crate) async fn put_location(ex: &mut Executor, location: &Location) -> DbResult<()> {
    match ex {
        Executor::Postgres(ex) => postgres::put_location(ex, location).await,

        #[cfg(test)]
        Executor::Sqlite(ex) => sqlite::put_location(ex, location).await,
    }
}

/// Deletes the location stored under `id`.
pub(crate) async fn delete_location(ex: &mut Executor, id: &LocationId) -> DbResult<()> {
    match ex {
        Executor::Postgres(ex) => postgres::delete_location(ex, id).await,

        #[cfg(test)]
        Executor::Sqlite(ex) => sqlite::delete_location(ex, id).await,
    }
}
