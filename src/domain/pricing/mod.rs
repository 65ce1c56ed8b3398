//! Pricing domain module.
//!
//! Rent statistics per location and the suggestions built from them.

mod stats;
mod suggestion;

pub use stats::{compute_price_stats, summarize, PriceStat};
pub use suggestion::{Confidence, PriceSuggestion};
