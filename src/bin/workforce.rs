//! Administrative commands against the `PostgreSQL` store.
//!
//! Usage:
//!
//! ```text
//! workforce [--database-url <url>] <command>
//! ```
//!
//! Commands:
//!
//! - `migrate` creates the schema on an empty database
//! - `recalculate` recomputes every employee's score
//! - `leaderboard [--limit N]` prints the top employees by score
//! - `team-stats` prints team aggregates
//!
//! Results are written to stdout as JSON; logs go to stderr.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;
use workforce::config::WorkforceSettings;
use workforce::identity::{
    adapters::postgres::PostgresProfileRepository,
    domain::{Actor, UserId},
};
use workforce::locks::EmployeeLocks;
use workforce::postgres::{apply_schema, build_pool};
use workforce::scoring::services::ScoringService;
use workforce::task::adapters::postgres::PostgresTaskRepository;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser, Debug)]
#[command(name = "workforce")]
#[command(about = "Administrative commands for task scoring and leave management")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    settings: WorkforceSettings,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the database schema
    Migrate,
    /// Recompute every employee's score
    Recalculate,
    /// Print the employees with the highest scores
    Leaderboard {
        /// Number of entries; defaults to `--leaderboard-limit`
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print team aggregates
    TeamStats,
}

#[derive(Debug, Serialize)]
struct RecalculatedScore {
    user_id: UserId,
    score: u64,
}

fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    init_tracing(&cli.settings.log_level)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(cli))
}

fn init_tracing(log_level: &str) -> Result<(), BoxError> {
    let filter = EnvFilter::try_new(log_level)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()?;
    Ok(())
}

async fn run(cli: Cli) -> Result<(), BoxError> {
    let Cli { settings, command } = cli;
    let pool = build_pool(&settings.database_url)?;

    if matches!(command, Command::Migrate) {
        let migration_pool = pool.clone();
        tokio::task::spawn_blocking(move || -> Result<(), BoxError> {
            let mut connection = migration_pool.get()?;
            apply_schema(&mut connection)?;
            Ok(())
        })
        .await??;
        info!("schema created");
        return Ok(());
    }

    let scoring = ScoringService::new(
        Arc::new(PostgresTaskRepository::new(pool.clone())),
        Arc::new(PostgresProfileRepository::new(pool)),
        Arc::new(mockable::DefaultClock),
        Arc::new(EmployeeLocks::new()),
        settings.scoring_policy(),
    );
    let admin = Actor::manager(UserId::from_uuid(Uuid::nil()));

    match command {
        Command::Migrate => Ok(()),
        Command::Recalculate => {
            let scores: Vec<RecalculatedScore> = scoring
                .recalculate_all(&admin)
                .await?
                .into_iter()
                .map(|(user_id, score)| RecalculatedScore { user_id, score })
                .collect();
            emit(&scores)
        }
        Command::Leaderboard { limit } => {
            let entries = scoring
                .leaderboard(&admin, limit.unwrap_or(settings.leaderboard_limit))
                .await?;
            emit(&entries)
        }
        Command::TeamStats => emit(&scoring.team_stats(&admin).await?),
    }
}

fn emit(value: &impl Serialize) -> Result<(), BoxError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
