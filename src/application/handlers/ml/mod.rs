//! ML microservice handlers.
//!
//! ## Queries
//! - User clustering and churn prediction
//! - Dynamic pricing for a listing
//!
//! Each accepts raw feature data or derives it from stored records.

mod predict_price;
mod predict_user;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::MlError;

// Queries
pub use predict_price::{PredictPriceHandler, PredictPriceQuery};
pub use predict_user::{PredictUserHandler, PredictUserQuery, UserModel};

/// Detail key carrying the ML service's HTTP status.
pub const UPSTREAM_STATUS_DETAIL: &str = "upstream_status";
/// Detail key carrying the ML service's response body.
pub const UPSTREAM_BODY_DETAIL: &str = "details";

/// Keeps the upstream status and body so the HTTP layer can pass them on.
pub(crate) fn ml_error(err: MlError) -> DomainError {
    tracing::warn!(error = %err, "ML service call failed");
    match err {
        MlError::Upstream { status, body } => {
            DomainError::new(ErrorCode::ExternalService, "Errore nel servizio ML")
                .with_detail(UPSTREAM_STATUS_DETAIL, status.to_string())
                .with_detail(UPSTREAM_BODY_DETAIL, body)
        }
        MlError::Unavailable(reason) => {
            DomainError::new(ErrorCode::ExternalService, "Servizio ML non disponibile")
                .with_detail(UPSTREAM_STATUS_DETAIL, "503")
                .with_detail(UPSTREAM_BODY_DETAIL, reason)
        }
        MlError::Parse(reason) => DomainError::new(ErrorCode::ExternalService, "Errore del server")
            .with_detail(UPSTREAM_BODY_DETAIL, reason),
    }
}
