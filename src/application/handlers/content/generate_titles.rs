//! GenerateTitlesHandler - Command handler for AI title suggestions.

use std::sync::Arc;

use crate::domain::content::{
    parse_title_suggestions, title_prompt, PropertyAttributes, COPYWRITER_SYSTEM_PROMPT,
};
use crate::domain::foundation::DomainError;
use crate::ports::{GenerationRequest, TextGenerator};

use super::generation_error;

#[derive(Debug, Clone)]
pub struct GenerateTitlesCommand {
    pub attributes: PropertyAttributes,
}

/// Asks for one title per line and returns at most five cleaned titles.
pub struct GenerateTitlesHandler {
    generator: Arc<dyn TextGenerator>,
}

impl GenerateTitlesHandler {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn handle(&self, cmd: GenerateTitlesCommand) -> Result<Vec<String>, DomainError> {
        cmd.attributes.validate()?;

        let request = GenerationRequest::new(COPYWRITER_SYSTEM_PROMPT, title_prompt(&cmd.attributes))
            .with_max_tokens(200)
            .with_temperature(0.8);

        let raw = self
            .generator
            .generate(request)
            .await
            .map_err(generation_error)?;
        Ok(parse_title_suggestions(&raw))
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
            property_type: "stanza_doppia".to_string(),
            city: "Pisa".to_string(),
            features: vec!["balcone".to_string()],
            ..PropertyAttributes::default()
        }
    }

    #[tokio::test]
    async fn output_is_split_into_clean_titles() {
        let generator = Arc::new(MockTextGenerator::new().with_response(
            "1. \"Doppia luminosa vicino alla Torre\"\n\n2. Stanza con balcone\n- Ideale per studenti\n",
        ));
        let titles = GenerateTitlesHandler::new(generator.clone())
            .handle(GenerateTitlesCommand {
                attributes: attributes(),
            })
            .await
            .unwrap();

        assert_eq!(
            titles,
            vec![
                "Doppia luminosa vicino alla Torre",
                "Stanza con balcone",
                "Ideale per studenti"
            ]
        );
        assert!(generator.calls()[0].prompt.contains("stanza doppia a Pisa"));
        assert!(generator.calls()[0].prompt.contains("balcone"));
    }

    #[tokio::test]
    async fn upstream_failure_is_an_external_service_error() {
        let generator = Arc::new(
            MockTextGenerator::new().with_error(AIError::Unavailable("503".to_string())),
        );
        let err = GenerateTitlesHandler::new(generator)
            .handle(GenerateTitlesCommand {
                attributes: attributes(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ExternalService);
    }
}
