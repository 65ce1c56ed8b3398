//! Reviews left by users on listings.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PropertyId, ReviewId, Timestamp, UserId, ValidationError};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;
/// Maximum length of the owner's response, in characters.
pub const MAX_RESPONSE_LEN: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub property_id: PropertyId,
    pub rating: i32,
    pub comment: Option<String>,
    pub owner_response: Option<String>,
    pub helpful_count: i32,
    pub unhelpful_count: i32,
    pub created_at: Timestamp,
}

impl Review {
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

fn validate_rating(rating: i32) -> Result<(), ValidationError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::out_of_range(
            "rating",
            MIN_RATING as i64,
            MAX_RATING as i64,
            rating as i64,
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub property_id: PropertyId,
    pub rating: i32,
    #[serde(default)]
    pub comment: Option<String>,
}

impl NewReview {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_rating(self.rating)
    }

    pub fn into_review(self, id: ReviewId, author: UserId, now: Timestamp) -> Review {
        Review {
            id,
            user_id: author,
            property_id: self.property_id,
            rating: self.rating,
            comment: self.comment,
            owner_response: None,
            helpful_count: 0,
            unhelpful_count: 0,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUpdate {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

impl ReviewUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.rating {
            Some(rating) => validate_rating(rating),
            None => Ok(()),
        }
    }

    pub fn apply(self, review: &mut Review) {
        if let Some(rating) = self.rating {
            review.rating = rating;
        }
        if let Some(comment) = self.comment {
            review.comment = Some(comment);
        }
    }
}

/// Checks the listing owner's reply to a review.
pub fn validate_owner_response(response: &str) -> Result<String, ValidationError> {
    let trimmed = response.trim();
    let len = trimmed.chars().count();
    if len == 0 {
        return Err(ValidationError::empty_field("response"));
    }
    if len > MAX_RESPONSE_LEN {
        return Err(ValidationError::out_of_range(
            "response",
            1,
            MAX_RESPONSE_LEN as i64,
            len as i64,
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
pub(crate) fn sample_review(id: i32, author: i32, property: i32) -> Review {
    Review {
        id: ReviewId::from_raw(id),
        user_id: UserId::from_raw(author),
        property_id: PropertyId::from_raw(property),
        rating: 4,
        comment: Some("Bella stanza".into()),
        owner_response: None,
        helpful_count: 0,
        unhelpful_count: 0,
        created_at: Timestamp::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_must_be_between_one_and_five() {
        for rating in [0, 6, -1] {
            let review = NewReview {
                property_id: PropertyId::from_raw(1),
                rating,
                comment: None,
            };
            assert!(review.validate().is_err(), "rating {} accepted", rating);
        }
        let review = NewReview {
            property_id: PropertyId::from_raw(1),
            rating: 5,
            comment: None,
        };
        assert!(review.validate().is_ok());
    }

    #[test]
    fn update_keeps_fields_that_are_not_given() {
        let mut review = sample_review(1, 1, 1);
        ReviewUpdate {
            rating: Some(2),
            comment: None,
        }
        .apply(&mut review);
        assert_eq!(review.rating, 2);
        assert_eq!(review.comment.as_deref(), Some("Bella stanza"));
    }

    #[test]
    fn owner_response_length_is_bounded() {
        assert!(validate_owner_response("  ").is_err());
        assert!(validate_owner_response(&"a".repeat(501)).is_err());
        assert_eq!(validate_owner_response(" Grazie ").unwrap(), "Grazie");
    }
}
