//! HTTP handlers for review endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::reviews::{
    CreateReviewCommand, CreateReviewHandler, DeleteReviewCommand, DeleteReviewHandler,
    GetReviewHandler, GetReviewQuery, GetUserReviewHandler, GetUserReviewQuery,
    ListPropertyReviewsHandler, ListPropertyReviewsQuery, ReportReviewCommand,
    ReportReviewHandler, RespondToReviewCommand, RespondToReviewHandler, UpdateReviewCommand,
    UpdateReviewHandler, VoteReviewCommand, VoteReviewHandler,
};
use crate::domain::foundation::{PropertyId, ReviewId};
use crate::domain::review::{NewReport, NewReview, ReviewUpdate};
use crate::ports::{PropertyRepository, ReviewRepository};

use super::dto::{RespondRequest, VoteRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ReviewsAppState {
    pub reviews: Arc<dyn ReviewRepository>,
    pub properties: Arc<dyn PropertyRepository>,
}

impl ReviewsAppState {
    pub fn new(reviews: Arc<dyn ReviewRepository>, properties: Arc<dyn PropertyRepository>) -> Self {
        Self {
            reviews,
            properties,
        }
    }

    pub fn list_handler(&self) -> ListPropertyReviewsHandler {
        ListPropertyReviewsHandler::new(self.reviews.clone())
    }

    pub fn get_handler(&self) -> GetReviewHandler {
        GetReviewHandler::new(self.reviews.clone())
    }

    pub fn user_review_handler(&self) -> GetUserReviewHandler {
        GetUserReviewHandler::new(self.reviews.clone())
    }

    pub fn create_handler(&self) -> CreateReviewHandler {
        CreateReviewHandler::new(self.reviews.clone(), self.properties.clone())
    }

    pub fn update_handler(&self) -> UpdateReviewHandler {
        UpdateReviewHandler::new(self.reviews.clone())
    }

    pub fn delete_handler(&self) -> DeleteReviewHandler {
        DeleteReviewHandler::new(self.reviews.clone())
    }

    pub fn respond_handler(&self) -> RespondToReviewHandler {
        RespondToReviewHandler::new(self.reviews.clone(), self.properties.clone())
    }

    pub fn report_handler(&self) -> ReportReviewHandler {
        ReportReviewHandler::new(self.reviews.clone())
    }

    pub fn vote_handler(&self) -> VoteReviewHandler {
        VoteReviewHandler::new(self.reviews.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Queries
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/properties/:id/reviews
pub async fn list_property_reviews(
    State(state): State<ReviewsAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let property_id: PropertyId = id.parse()?;
    let reviews = state
        .list_handler()
        .handle(ListPropertyReviewsQuery { property_id })
        .await?;
    Ok(Json(reviews))
}

/// GET /api/reviews/:id
pub async fn get_review(
    State(state): State<ReviewsAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let review_id: ReviewId = id.parse()?;
    let review = state.get_handler().handle(GetReviewQuery { review_id }).await?;
    Ok(Json(review))
}

/// GET /api/properties/:id/user-review
pub async fn get_user_review(
    State(state): State<ReviewsAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let property_id: PropertyId = id.parse()?;
    let review = state
        .user_review_handler()
        .handle(GetUserReviewQuery {
            user_id: user.id,
            property_id,
        })
        .await?;
    Ok(Json(review))
}

// ════════════════════════════════════════════════════════════════════════════════
// Authoring
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/reviews
pub async fn create_review(
    State(state): State<ReviewsAppState>,
    RequireAuth(user): RequireAuth,
    Json(review): Json<NewReview>,
) -> Result<impl IntoResponse, ApiError> {
    let review = state
        .create_handler()
        .handle(CreateReviewCommand {
            author_id: user.id,
            review,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// PUT /api/reviews/:id
pub async fn update_review(
    State(state): State<ReviewsAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(update): Json<ReviewUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    let review_id: ReviewId = id.parse()?;
    let review = state
        .update_handler()
        .handle(UpdateReviewCommand {
            user_id: user.id,
            review_id,
            update,
        })
        .await?;
    Ok(Json(review))
}

/// DELETE /api/reviews/:id
pub async fn delete_review(
    State(state): State<ReviewsAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let review_id: ReviewId = id.parse()?;
    state
        .delete_handler()
        .handle(DeleteReviewCommand {
            user_id: user.id,
            review_id,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Feedback on reviews
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/reviews/:id/respond
pub async fn respond_to_review(
    State(state): State<ReviewsAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<RespondRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let review_id: ReviewId = id.parse()?;
    let review = state
        .respond_handler()
        .handle(RespondToReviewCommand {
            user_id: user.id,
            review_id,
            response: req.response,
        })
        .await?;
    Ok(Json(review))
}

/// POST /api/reviews/:id/report
pub async fn report_review(
    State(state): State<ReviewsAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(report): Json<NewReport>,
) -> Result<impl IntoResponse, ApiError> {
    let review_id: ReviewId = id.parse()?;
    let report = state
        .report_handler()
        .handle(ReportReviewCommand {
            user_id: user.id,
            review_id,
            report,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// POST /api/reviews/:id/vote
pub async fn vote_review(
    State(state): State<ReviewsAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<VoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let review_id: ReviewId = id.parse()?;
    let review = state
        .vote_handler()
        .handle(VoteReviewCommand {
            user_id: user.id,
            review_id,
            is_helpful: req.is_helpful,
        })
        .await?;
    Ok(Json(review))
}
