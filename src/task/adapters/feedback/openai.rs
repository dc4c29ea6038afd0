//! OpenAI-compatible chat-completions feedback generator.
//!
//! Works with any endpoint exposing `POST {base_url}/chat/completions`,
//! such as vLLM, Ollama or the hosted `OpenAI` API.

use async_trait::async_trait;
use minijinja::{Environment, context};
use reqwest::{Client, header};
use serde::{Deserialize, Serialize};

use crate::config::FeedbackSettings;
use crate::task::ports::{FeedbackError, FeedbackGenerator, FeedbackRequest};

const PROMPT_TEMPLATE: &str = "\
Review this task status report and provide constructive feedback.

Task: {{ task_title }}
Progress: {{ progress }}%
Status Report: {{ report_text }}

Reply with short, actionable feedback: what is going well, any concerns, \
and the next steps you would suggest.";

/// Feedback generator backed by an OpenAI-compatible API.
#[derive(Debug, Clone)]
pub struct OpenAiFeedbackGenerator {
    client: Client,
    settings: FeedbackSettings,
}

impl OpenAiFeedbackGenerator {
    /// Creates a generator for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(settings: FeedbackSettings) -> Result<Self, FeedbackError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|err| FeedbackError::Transport(err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.settings.base_url)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageResponse,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Option<String>,
}

pub(super) fn render_prompt(request: &FeedbackRequest) -> Result<String, FeedbackError> {
    Environment::new()
        .render_str(
            PROMPT_TEMPLATE,
            context! {
                task_title => request.task_title,
                progress => request.progress.percent(),
                report_text => request.report_text,
            },
        )
        .map_err(|err| FeedbackError::Prompt(err.to_string()))
}

#[async_trait]
impl FeedbackGenerator for OpenAiFeedbackGenerator {
    async fn generate_feedback(&self, request: &FeedbackRequest) -> Result<String, FeedbackError> {
        let body = ChatRequest {
            model: &self.settings.model,
            messages: vec![ChatMessage {
                role: "user",
                content: render_prompt(request)?,
            }],
            stream: false,
        };

        let mut http_request = self.client.post(self.chat_completions_url());
        if let Some(api_key) = &self.settings.api_key {
            http_request = http_request.bearer_auth(api_key);
        }

        let response = http_request
            .json(&body)
            .send()
            .await
            .map_err(|err| FeedbackError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(FeedbackError::Transport(format!("HTTP {status}: {detail}")));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|err| FeedbackError::InvalidResponse(err.to_string()))?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_owned())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| FeedbackError::InvalidResponse("no feedback text in response".to_owned()))
    }
}
