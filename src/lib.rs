//! In&Out - backend for a real-estate listing marketplace.
//!
//! Owners publish rental and sale listings gated by free, single or
//! subscription credits paid through Stripe. Around the listings the API
//! offers search and map views, pricing suggestions, messaging, reviews,
//! contract signing, favorites and recommendations, AI-written descriptions,
//! ML predictions and an admin dashboard.
//!
//! The crate is laid out hexagonally: `domain` holds records and rules,
//! `ports` the async traits, `adapters` their implementations and
//! `application` the command and query handlers between them.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
