//! AI copywriting handlers.
//!
//! ## Commands
//! - Generating a listing description
//! - Generating title suggestions

mod generate_description;
mod generate_titles;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::AIError;

// Commands
pub use generate_description::{GenerateDescriptionCommand, GenerateDescriptionHandler};
pub use generate_titles::{GenerateTitlesCommand, GenerateTitlesHandler};

/// A missing API key is a server misconfiguration, not an upstream outage.
fn generation_error(err: AIError) -> DomainError {
    match err {
        AIError::NotConfigured => {
            DomainError::new(ErrorCode::InternalError, "API Key OpenAI non configurata")
        }
        other => {
            tracing::warn!(error = %other, "Text generation failed");
            other.into()
        }
    }
}
