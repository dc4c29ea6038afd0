//! Feedback collaborator adapters.

mod disabled;
mod openai;

pub use disabled::DisabledFeedback;
pub use openai::OpenAiFeedbackGenerator;
