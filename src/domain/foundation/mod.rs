//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, the authenticated caller and the error
//! types used by every area of the marketplace.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, Role};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    CityId, DocumentId, FavoriteId, InteractionId, MessageId, PropertyId, ReportId, ReviewId,
    SavedSearchId, SignatureId, UserId, VoteId,
};
pub use timestamp::Timestamp;
