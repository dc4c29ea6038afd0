//! Temporary database lifecycle for `PostgreSQL` integration tests.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use uuid::Uuid;
use workforce::postgres::{PgPool, apply_schema, build_pool};

/// Environment variable naming an administrative connection URL.
pub const DATABASE_URL_ENV: &str = "WORKFORCE_TEST_DATABASE_URL";

/// A freshly created, migrated database dropped again on `Drop`.
pub struct TemporaryDatabase {
    admin_url: String,
    name: String,
    pool: PgPool,
}

impl TemporaryDatabase {
    /// Creates and migrates a database, or returns `None` when no server is
    /// configured.
    ///
    /// # Errors
    ///
    /// Returns an error when the server rejects the database or schema.
    pub fn create() -> eyre::Result<Option<Self>> {
        let Ok(admin_url) = std::env::var(DATABASE_URL_ENV) else {
            return Ok(None);
        };
        let name = format!("workforce_test_{}", Uuid::new_v4().simple());
        let mut admin = PgConnection::establish(&admin_url)?;
        admin.batch_execute(&format!("CREATE DATABASE {name}"))?;

        let base = admin_url
            .rsplit_once('/')
            .map_or(admin_url.as_str(), |(prefix, _)| prefix);
        let pool = build_pool(&format!("{base}/{name}"))?;
        apply_schema(&mut *pool.get()?)?;
        Ok(Some(Self {
            admin_url,
            name,
            pool,
        }))
    }

    /// Returns a pool connected to the temporary database.
    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }
}

impl Drop for TemporaryDatabase {
    fn drop(&mut self) {
        if let Ok(mut admin) = PgConnection::establish(&self.admin_url) {
            if let Err(err) = admin.batch_execute(&format!(
                "DROP DATABASE IF EXISTS {} WITH (FORCE)",
                self.name
            )) {
                tracing::warn!(database = %self.name, error = %err, "failed to drop test database");
            }
        }
    }
}
