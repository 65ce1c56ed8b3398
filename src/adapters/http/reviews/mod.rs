//! HTTP adapter for review endpoints.
//!
//! - `GET /api/properties/:id/reviews` - Reviews of a listing
//! - `GET /api/properties/:id/user-review` - The caller's review of a listing
//! - `POST /api/reviews` - Write a review
//! - `GET|PUT|DELETE /api/reviews/:id` - Single review, author-only writes
//! - `POST /api/reviews/:id/respond` - Listing owner's public response
//! - `POST /api/reviews/:id/report` - Flag a review for moderation
//! - `POST /api/reviews/:id/vote` - Helpful or unhelpful vote

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ReviewsAppState;
pub use routes::reviews_router;
