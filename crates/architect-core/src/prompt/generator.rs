//! Generator trait implemented by the generative-AI client.

use super::{CreativityLevel, PromptStyle};
use crate::attachment::Attachment;
use crate::error::Result;
use async_trait::async_trait;

/// Multimodal input for the super-prompt stage.
#[derive(Debug, Clone, PartialEq)]
pub struct SuperPromptRequest {
    pub idea: String,
    pub style: PromptStyle,
    pub creativity: CreativityLevel,
    pub attachments: Vec<Attachment>,
}

/// The two request/response exchanges with the external model.
///
/// The credential is passed per call and never held by the session state.
/// Implementations make exactly one attempt per call; every failure kind
/// (auth, quota, network, malformed body) surfaces as
/// [`ArchitectError::Service`](crate::error::ArchitectError::Service).
#[async_trait]
pub trait PromptGenerator: Send + Sync {
    /// Turns an idea (plus attachments) into a structured super prompt.
    async fn generate_super_prompt(
        &self,
        api_key: &str,
        request: &SuperPromptRequest,
    ) -> Result<String>;

    /// Runs a previously generated super prompt and returns the model's answer.
    async fn execute_prompt(&self, api_key: &str, super_prompt: &str) -> Result<String>;
}
