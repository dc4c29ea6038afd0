//! Port for the advisory feedback collaborator.
//!
//! Feedback is generated from a status report and is never allowed to
//! gate task state. Callers treat every [`FeedbackError`] as auxiliary.

use crate::task::domain::Progress;
use async_trait::async_trait;
use thiserror::Error;

/// Input for a single feedback generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRequest {
    /// Title of the reported task.
    pub task_title: String,
    /// Body of the status report.
    pub report_text: String,
    /// Reported progress.
    pub progress: Progress,
}

/// Stateless request/response feedback generator.
#[async_trait]
pub trait FeedbackGenerator: Send + Sync {
    /// Generates advisory feedback text for a status report.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackError`] when the collaborator is disabled,
    /// unreachable, or answers with an unusable payload.
    async fn generate_feedback(&self, request: &FeedbackRequest) -> Result<String, FeedbackError>;
}

/// Failures of the feedback collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FeedbackError {
    /// No collaborator is configured.
    #[error("feedback generation is disabled")]
    Disabled,

    /// The prompt could not be rendered.
    #[error("failed to render feedback prompt: {0}")]
    Prompt(String),

    /// The request failed in transit or returned an error status.
    #[error("feedback request failed: {0}")]
    Transport(String),

    /// The collaborator answered without usable text.
    #[error("feedback response was invalid: {0}")]
    InvalidResponse(String),

    /// The collaborator did not answer within the configured bound.
    #[error("feedback request timed out after {0} ms")]
    Timeout(u64),
}
