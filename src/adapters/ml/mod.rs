//! ML microservice adapters.

mod http_client;
mod mock;

pub use http_client::{HttpMlService, DEFAULT_ML_BASE_URL};
pub use mock::MockMlService;
