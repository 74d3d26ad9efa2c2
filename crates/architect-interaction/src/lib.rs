//! Generative-AI integration: prompt text and the Gemini REST client.

pub mod gemini_client;
pub mod prompts;

pub use gemini_client::{DEFAULT_GEMINI_MODEL, GeminiClient};
pub use prompts::{SECTION_MARKERS, SYSTEM_INSTRUCTION, build_idea_prompt};
