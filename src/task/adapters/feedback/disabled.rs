//! Feedback generator used when no collaborator is configured.

use async_trait::async_trait;

use crate::task::ports::{FeedbackError, FeedbackGenerator, FeedbackRequest};

/// Generator that always reports [`FeedbackError::Disabled`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledFeedback;

#[async_trait]
impl FeedbackGenerator for DisabledFeedback {
    async fn generate_feedback(&self, _request: &FeedbackRequest) -> Result<String, FeedbackError> {
        Err(FeedbackError::Disabled)
    }
}
