//! `PostgreSQL` adapters for task and status report persistence.

mod models;
mod report;
mod repository;
mod schema;

pub use report::PostgresStatusReportRepository;
pub use repository::PostgresTaskRepository;
