//! Shared `PostgreSQL` connection pool helpers.
//!
//! Each bounded context owns its Diesel schema and repository; they share
//! one pool type so a single pool can back every repository.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::result::Error as DieselError;

/// `PostgreSQL` connection pool type used by every adapter.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// SQL creating every table the adapters use.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../migrations/2026-10-16-000000_create_workforce_tables/up.sql");

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`PoolError`] when the pool cannot establish its initial
/// connections.
pub fn build_pool(database_url: &str) -> Result<PgPool, PoolError> {
    Pool::builder().build(ConnectionManager::<PgConnection>::new(database_url))
}

/// Creates the schema on an empty database.
///
/// Blocking; call from `spawn_blocking` inside async code.
///
/// # Errors
///
/// Returns the Diesel error when any statement fails, including when the
/// tables already exist.
pub fn apply_schema(connection: &mut PgConnection) -> Result<(), DieselError> {
    connection.batch_execute(CREATE_SCHEMA_SQL)
}
