//! GenerateDescriptionHandler - Command handler for AI-written descriptions.

use std::sync::Arc;

use crate::domain::content::{description_prompt, PropertyAttributes, COPYWRITER_SYSTEM_PROMPT};
use crate::domain::foundation::DomainError;
use crate::ports::{GenerationRequest, TextGenerator};

use super::generation_error;

#[derive(Debug, Clone)]
pub struct GenerateDescriptionCommand {
    pub attributes: PropertyAttributes,
}

pub struct GenerateDescriptionHandler {
    generator: Arc<dyn TextGenerator>,
}

impl GenerateDescriptionHandler {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn handle(&self, cmd: GenerateDescriptionCommand) -> Result<String, DomainError> {
        cmd.attributes.validate()?;

        let request = GenerationRequest::new(COPYWRITER_SYSTEM_PROMPT, description_prompt(&cmd.attributes))
            .with_max_tokens(500)
            .with_temperature(0.7);

        tracing::info!(summary = %cmd.attributes.summary(), "Generating listing description");
        self.generator.generate(request).await.map_err(generation_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockTextGenerator;
    use crate::domain::foundation::ErrorCode;
    use crate::ports::AIError;

    fn attributes() -> PropertyAttributes {
        PropertyAttributes {
            property_type: "bilocale".to_string(),
            city: "Padova".to_string(),
            square_meters: Some(55),
            ..PropertyAttributes::default()
        }
    }

    #[tokio::test]
    async fn prompt_carries_the_listing_summary() {
        let generator = Arc::new(MockTextGenerator::new().with_response("Splendido bilocale."));
        let description = GenerateDescriptionHandler::new(generator.clone())
            .handle(GenerateDescriptionCommand {
                attributes: attributes(),
            })
            .await
            .unwrap();

        assert_eq!(description, "Splendido bilocale.");
        let calls = generator.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].prompt.contains("bilocale a Padova, 55 mq"));
        assert_eq!(calls[0].system_prompt, COPYWRITER_SYSTEM_PROMPT);
        assert_eq!(calls[0].max_tokens, Some(500));
    }

    #[tokio::test]
    async fn missing_city_never_reaches_the_generator() {
        let generator = Arc::new(MockTextGenerator::new());
        let err = GenerateDescriptionHandler::new(generator.clone())
            .handle(GenerateDescriptionCommand {
                attributes: PropertyAttributes {
                    city: String::new(),
                    ..attributes()
                },
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_api_key_is_an_internal_error() {
        let generator = Arc::new(MockTextGenerator::new().with_error(AIError::NotConfigured));
        let err = GenerateDescriptionHandler::new(generator)
            .handle(GenerateDescriptionCommand {
                attributes: attributes(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(err.message, "API Key OpenAI non configurata");
    }
}
