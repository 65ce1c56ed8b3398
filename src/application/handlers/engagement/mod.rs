//! Engagement handlers.
//!
//! ## Commands
//! - Adding and removing favorites
//! - Saving and deleting searches
//! - Recording interactions
//!
//! ## Queries
//! - Favorites and saved searches of the caller
//! - Recommendations and similar listings

mod favorites;
mod record_interaction;
mod recommendations;
mod saved_searches;

// Commands
pub use favorites::{AddFavoriteCommand, AddFavoriteHandler, RemoveFavoriteCommand, RemoveFavoriteHandler};
pub use record_interaction::{RecordInteractionCommand, RecordInteractionHandler};
pub use saved_searches::{
    CreateSavedSearchCommand, CreateSavedSearchHandler, DeleteSavedSearchCommand,
    DeleteSavedSearchHandler,
};

// Queries
pub use favorites::{ListFavoritesHandler, ListFavoritesQuery};
pub use recommendations::{
    GetRecommendationsHandler, GetRecommendationsQuery, GetSimilarPropertiesHandler,
    GetSimilarPropertiesQuery,
};
pub use saved_searches::{ListSavedSearchesHandler, ListSavedSearchesQuery};
