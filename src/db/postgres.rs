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

//! Implementation of the database abstraction using PostgreSQL.

use crate::db::{Db, DbError, DbResult, Executor, TxExecutor};
use crate::model::{Coordinate, Location, LocationId};
use async_trait::async_trait;
use log::warn;
use sqlx::postgres::{PgConnection, PgDatabaseError, PgPool, Postgres};
use sqlx::pool::PoolConnection;
use sqlx::{Row, Transaction};

/// Schema to use to initialize the production database.
const SCHEMA: &str = include_str!("postgres.sql");

/// Takes a raw SQLx error `e` and converts it to our generic error type.
pub(crate) fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match e {
        sqlx::Error::ColumnDecode { source, .. } => DbError::DataIntegrityError(source.to_string()),
        sqlx::Error::Database(e) => match e.downcast_ref::<PgDatabaseError>().code() {
            "23503" /* foreign_key_violation */ => DbError::NotFound,
            "23505" /* unique_violation */ => DbError::AlreadyExists,
            "53300" /* too_many_connections */ => DbError::Unavailable,
            number => DbError::BackendError(format!("pgsql error {}: {}", number, e)),
        },
        sqlx::Error::RowNotFound => DbError::NotFound,
        e => DbError::BackendError(e.to_string()),
    }
}

/// Creates a new connection pool against the database described by `uri`.
pub(crate) async fn connect(uri: &str) -> DbResult<PostgresDb> {
    let pool = PgPool::connect(uri).await.map_err(map_sqlx_error)?;
    Ok(PostgresDb { pool })
}

/// A generic database executor implementation for PostgreSQL.
pub(crate) enum PostgresExecutor {
    /// An executor backed by a pool.  Operations issued via this executor aren't guaranteed to
    /// happen on the same connection.
    PoolExec(PoolConnection<Postgres>),

    /// An executor backed by a transaction.
    TxExec(Transaction<'static, Postgres>),
}

impl PostgresExecutor {
    /// Returns the raw connection backing this executor for use in sqlx queries.
    fn conn(&mut self) -> &mut PgConnection {
        match self {
            PostgresExecutor::PoolExec(conn) => conn,
            PostgresExecutor::TxExec(tx) => tx,
        }
    }

    /// Commits the transaction if this executor is backed by one.
    ///
    /// Calling this on a non-transaction-based executor results in a panic.
    pub(super) async fn commit(self) -> DbResult<()> {
        match self {
            PostgresExecutor::PoolExec(_) => unreachable!("Do not call commit on direct executors"),
            PostgresExecutor::TxExec(tx) => tx.commit().await.map_err(map_sqlx_error),
        }
    }
}

/// A database instance backed by a PostgreSQL database.
pub(crate) struct PostgresDb {
    /// Shared PostgreSQL connection pool.  This is a cloneable type that all concurrent
    /// transactions can use concurrently.
    pool: PgPool,
}

impl Drop for PostgresDb {
    fn drop(&mut self) {
        if !self.pool.is_closed() {
            warn!("Dropping connection without having called close() first");
        }
    }
}

#[async_trait]
impl Db for PostgresDb {
    async fn ex(&self) -> DbResult<Executor> {
        let conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        Ok(Executor::Postgres(PostgresExecutor::PoolExec(conn)))
    }

    async fn begin(&self) -> DbResult<TxExecutor> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(TxExecutor(Executor::Postgres(PostgresExecutor::TxExec(tx))))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Initializes the schema used by this database implementation.
pub(super) async fn init_schema(ex: &mut PostgresExecutor) -> DbResult<()> {
    sqlx::query(SCHEMA).execute(ex.conn()).await.map_err(map_sqlx_error)?;
    Ok(())
}

/// Gets the location stored under `id`.
pub(super) async fn get_location(ex: &mut PostgresExecutor, id: &LocationId) -> DbResult<Location> {
    let query_str = "
        SELECT name, address, city, state, zip, latitude, longitude
        FROM locations WHERE id = $1
    ";
    let row = sqlx::query(query_str)
        .bind(id.as_str())
        .fetch_one(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    let name: String = row.try_get("name").map_err(map_sqlx_error)?;
    let address: String = row.try_get("address").map_err(map_sqlx_error)?;
    let city: String = row.try_get("city").map_err(map_sqlx_error)?;
    let state: String = row.try_get("state").map_err(map_sqlx_error)?;
    let zip: String = row.try_get("zip").map_err(map_sqlx_error)?;
    let latitude: f64 = row.try_get("latitude").map_err(map_sqlx_error)?;
    let longitude: f64 = row.try_get("longitude").map_err(map_sqlx_error)?;

    Ok(Location::new(
        name,
        address,
        city,
        state,
        zip,
        id.clone(),
        Coordinate::new(latitude, longitude),
    ))
}

/// Inserts `location` as a new record keyed by its identifier.
pub(super) async fn put_location(ex: &mut PostgresExecutor, location: &Location) -> DbResult<()> {
    let query_str = "
        INSERT INTO locations (id, name, address, city, state, zip, latitude, longitude)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
    ";
    let done = sqlx::query(query_str)
        .bind(location.id().as_str())
        .bind(location.name().as_str())
        .bind(location.address().as_str())
        .bind(location.city().as_str())
        .bind(location.state().as_str())
        .bind(location.zip().as_str())
        .bind(*location.coordinate().latitude())
        .bind(*location.coordinate().longitude())
        .execute(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    if done.rows_affected() != 1 {
        return Err(DbError::BackendError("Insertion affected more than one row".to_owned()));
    }
    Ok(())
}

/// Deletes the location stored under `id`.
pub(super) async fn delete_location(ex: &mut PostgresExecutor, id: &LocationId) -> DbResult<()> {
    let query_str = "DELETE FROM locations WHERE id = $1";
    let done = sqlx::query(query_str)
        .bind(id.as_str())
        .execute(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    if done.rows_affected() == 0 {
        return Err(DbError::NotFound);
    } else if done.rows_affected() != 1 {
        return Err(DbError::BackendError("Deletion affected more than one row".to_owned()));
    }
    Ok(())
}
