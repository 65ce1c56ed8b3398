//! Pricing handlers.
//!
//! ## Commands
//! - Recomputing price statistics (admin)
//!
//! ## Queries
//! - Price suggestion for a city, zone and type

mod calculate_price_stats;
mod get_pricing_suggestion;

// Commands
pub use calculate_price_stats::{CalculatePriceStatsCommand, CalculatePriceStatsHandler};

// Queries
pub use get_pricing_suggestion::{GetPricingSuggestionHandler, GetPricingSuggestionQuery};
