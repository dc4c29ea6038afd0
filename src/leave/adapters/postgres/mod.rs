//! `PostgreSQL` adapter for leave persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresLeaveRepository;
