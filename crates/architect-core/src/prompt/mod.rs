//! Prompt generation inputs and the generator interface.
//!
//! # Module Structure
//!
//! - `style`: target domain of the super prompt (`PromptStyle`)
//! - `creativity`: creativity level and temperature mapping (`CreativityLevel`)
//! - `generator`: the `PromptGenerator` trait and its request type

mod creativity;
mod generator;
mod style;

pub use creativity::CreativityLevel;
pub use generator::{PromptGenerator, SuperPromptRequest};
pub use style::PromptStyle;
