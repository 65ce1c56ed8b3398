//! Engagement domain module.
//!
//! Favorites, saved searches, interaction tracking and the recommendation
//! rules that feed on them.

mod favorite;
mod interaction;

pub use favorite::{Favorite, FavoriteProperty, NewSavedSearch, SavedSearch};
pub use interaction::{
    is_similar, preferred_type, similar_listings, Interaction, InteractionType, NewInteraction,
    DEFAULT_RECOMMENDATION_LIMIT, SIMILAR_LIMIT, SIMILAR_PRICE_BAND_PERCENT,
};
