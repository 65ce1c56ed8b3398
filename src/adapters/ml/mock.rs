//! Mock ML service: canned replies per model plus a call log.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::ports::{MlError, MlModel, MlService};

#[derive(Debug, Clone, Default)]
pub struct MockMlService {
    replies: Arc<Mutex<HashMap<&'static str, Result<Value, MlError>>>>,
    calls: Arc<Mutex<Vec<(MlModel, Value)>>>,
}

impl MockMlService {
    pub fn new() -> Self {
        Self::default()
    }

    fn replies(&self) -> MutexGuard<'_, HashMap<&'static str, Result<Value, MlError>>> {
        self.replies.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn calls_mut(&self) -> MutexGuard<'_, Vec<(MlModel, Value)>> {
        self.calls.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn with_reply(self, model: MlModel, reply: Value) -> Self {
        self.replies().insert(model.path(), Ok(reply));
        self
    }

    pub fn with_error(self, model: MlModel, error: MlError) -> Self {
        self.replies().insert(model.path(), Err(error));
        self
    }

    pub fn calls(&self) -> Vec<(MlModel, Value)> {
        self.calls_mut().clone()
    }
}

#[async_trait]
impl MlService for MockMlService {
    async fn predict(&self, model: MlModel, features: Value) -> Result<Value, MlError> {
        self.calls_mut().push((model, features));
        self.replies()
            .get(model.path())
            .cloned()
            .unwrap_or_else(|| Ok(json!({ "model": model.path(), "mock": true })))
    }
}
