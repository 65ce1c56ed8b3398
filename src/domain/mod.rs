//! Domain layer containing business records and rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, errors, timestamps, auth)
//! - `account` - Users, subscription plans and publishing rights
//! - `listing` - Properties, countries, cities and search filters
//! - `billing` - Charge resolution and Stripe webhook classification
//! - `pricing` - Rent statistics and suggestions
//! - `messaging` - Messages and chat summaries
//! - `review` - Reviews, reports and votes
//! - `document` - Documents and e-signatures
//! - `engagement` - Favorites, saved searches, interactions, recommendations
//! - `content` - Prompts for AI-written listing copy
//! - `ml` - Feature vectors for the ML microservice
//! - `admin` - Dashboard aggregates and health metrics

pub mod account;
pub mod admin;
pub mod billing;
pub mod content;
pub mod document;
pub mod engagement;
pub mod foundation;
pub mod listing;
pub mod messaging;
pub mod ml;
pub mod pricing;
pub mod review;
