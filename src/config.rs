//! Runtime configuration.
//!
//! Settings are parsed with `clap` and every field can also be supplied
//! through the environment. Services never read the environment
//! themselves; they receive the derived policy values below.

pub use crate::task::domain::TransferMode;
use clap::Args;
use std::time::Duration;

/// Default leave-score deduction when leave is approved without transfer.
pub const DEFAULT_LEAVE_PENALTY: u32 = 10;

/// Default multiplier applied to the weight of failed tasks.
pub const DEFAULT_FAILURE_WEIGHT: u32 = 2;

/// Score arithmetic knobs injected into the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringPolicy {
    /// Multiplier applied to each failed task's score value.
    pub failure_weight: u32,
    /// Leave-score points removed when leave is approved without transfer.
    pub leave_penalty: u32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            failure_weight: DEFAULT_FAILURE_WEIGHT,
            leave_penalty: DEFAULT_LEAVE_PENALTY,
        }
    }
}

/// Connection settings for the feedback collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackSettings {
    /// Base URL of an OpenAI-compatible API, e.g. `http://localhost:11434/v1`.
    pub base_url: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Optional bearer token.
    pub api_key: Option<String>,
}

/// Top-level settings shared by the admin binary and embedding services.
#[derive(Args, Debug, Clone)]
pub struct WorkforceSettings {
    /// `PostgreSQL` connection URL
    #[arg(long, env = "DATABASE_URL", default_value = "postgres://localhost/workforce")]
    pub database_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Leave-score penalty applied when leave is approved without transfer
    #[arg(long, env = "LEAVE_PENALTY", default_value_t = DEFAULT_LEAVE_PENALTY)]
    pub leave_penalty: u32,

    /// Multiplier for the score value of failed tasks
    #[arg(long, env = "FAILURE_WEIGHT", default_value_t = DEFAULT_FAILURE_WEIGHT)]
    pub failure_weight: u32,

    /// Status handling for tasks reassigned by a leave transfer
    #[arg(long, env = "TRANSFER_MODE", default_value = "preserve-status")]
    pub transfer_mode: TransferMode,

    /// Default number of leaderboard entries
    #[arg(long, env = "LEADERBOARD_LIMIT", default_value_t = 10)]
    pub leaderboard_limit: usize,

    /// Base URL of the feedback API; feedback is disabled when unset
    #[arg(long, env = "FEEDBACK_URL")]
    pub feedback_url: Option<String>,

    /// Model used for status-report feedback
    #[arg(long, env = "FEEDBACK_MODEL", default_value = "gemma-3-27b-it")]
    pub feedback_model: String,

    /// Bearer token for the feedback API
    #[arg(long, env = "FEEDBACK_API_KEY")]
    pub feedback_api_key: Option<String>,

    /// Upper bound on a single feedback request, in milliseconds
    #[arg(long, env = "FEEDBACK_TIMEOUT_MS", default_value_t = 10_000)]
    pub feedback_timeout_ms: u64,
}

impl WorkforceSettings {
    /// Returns the scoring policy derived from these settings.
    #[must_use]
    pub const fn scoring_policy(&self) -> ScoringPolicy {
        ScoringPolicy {
            failure_weight: self.failure_weight,
            leave_penalty: self.leave_penalty,
        }
    }

    /// Returns feedback connection settings when a feedback URL is set.
    #[must_use]
    pub fn feedback_settings(&self) -> Option<FeedbackSettings> {
        self.feedback_url.as_ref().map(|base_url| FeedbackSettings {
            base_url: base_url.trim_end_matches('/').to_owned(),
            model: self.feedback_model.clone(),
            api_key: self.feedback_api_key.clone(),
        })
    }

    /// Returns the feedback timeout as a [`Duration`].
    #[must_use]
    pub const fn feedback_timeout(&self) -> Duration {
        Duration::from_millis(self.feedback_timeout_ms)
    }
}
