//! Strongly-typed identifier value objects.
//!
//! Every table uses a serial integer primary key, so each identifier wraps
//! a positive `i32`. The newtypes keep a `PropertyId` from being passed where
//! a `UserId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates an identifier, rejecting zero and negative values.
            pub fn new(value: i32) -> Result<Self, ValidationError> {
                if value <= 0 {
                    return Err(ValidationError::invalid_format(
                        $field,
                        "must be a positive integer",
                    ));
                }
                Ok(Self(value))
            }

            /// Wraps a value read back from storage without validation.
            pub fn from_raw(value: i32) -> Self {
                Self(value)
            }

            /// Returns the inner integer.
            pub fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value: i32 = s.trim().parse().map_err(|_| {
                    ValidationError::invalid_format($field, format!("'{}' is not a number", s))
                })?;
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> i32 {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a registered user.
    UserId,
    "user_id"
);
define_id!(
    /// Identifier of a listing.
    PropertyId,
    "property_id"
);
define_id!(MessageId, "message_id");
define_id!(ReviewId, "review_id");
define_id!(ReportId, "report_id");
define_id!(VoteId, "vote_id");
define_id!(DocumentId, "document_id");
define_id!(SignatureId, "signature_id");
define_id!(FavoriteId, "favorite_id");
define_id!(SavedSearchId, "saved_search_id");
define_id!(InteractionId, "interaction_id");
define_id!(CityId, "city_id");
