//! Text generation adapters.
//!
//! - `OpenAIProvider` - OpenAI chat completions
//! - `MockTextGenerator` - queued responses for tests

mod mock_provider;
mod openai_provider;

pub use mock_provider::MockTextGenerator;
pub use openai_provider::{OpenAIConfig, OpenAIProvider, DEFAULT_MODEL};
