//! Mock text generator for testing.
//!
//! Responses are queued and consumed in order; an empty queue yields
//! `"Mock response"`. Every request is recorded for verification.
//!
//! ```ignore
//! let generator = MockTextGenerator::new()
//!     .with_response("Luminoso bilocale in centro")
//!     .with_error(AIError::NotConfigured);
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::ports::{AIError, GenerationRequest, TextGenerator};

#[derive(Debug, Clone, Default)]
pub struct MockTextGenerator {
    responses: Arc<Mutex<VecDeque<Result<String, AIError>>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|p| p.into_inner())
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, content: impl Into<String>) -> Self {
        locked(&self.responses).push_back(Ok(content.into()));
        self
    }

    pub fn with_error(self, error: AIError) -> Self {
        locked(&self.responses).push_back(Err(error));
        self
    }

    /// Simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        locked(&self.calls).len()
    }

    pub fn calls(&self) -> Vec<GenerationRequest> {
        locked(&self.calls).clone()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, AIError> {
        locked(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        locked(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Ok("Mock response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn responses_are_consumed_in_order() {
        let generator = MockTextGenerator::new()
            .with_response("first")
            .with_error(AIError::NotConfigured);

        let request = GenerationRequest::new("sys", "prompt");
        assert_eq!(generator.generate(request.clone()).await.unwrap(), "first");
        assert_eq!(generator.generate(request.clone()).await, Err(AIError::NotConfigured));
        assert_eq!(generator.generate(request).await.unwrap(), "Mock response");
        assert_eq!(generator.call_count(), 3);
    }

    #[tokio::test]
    async fn records_prompts() {
        let generator = MockTextGenerator::new();
        generator
            .generate(GenerationRequest::new("sys", "descrivi"))
            .await
            .unwrap();
        assert_eq!(generator.calls()[0].prompt, "descrivi");
    }
}
