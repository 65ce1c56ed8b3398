//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations, grouped by
//! business area.

pub mod accounts;
pub mod admin;
pub mod billing;
pub mod content;
pub mod documents;
pub mod engagement;
pub mod listings;
pub mod messaging;
pub mod ml;
pub mod pricing;
pub mod reviews;
