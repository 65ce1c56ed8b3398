//! Account handlers.
//!
//! ## Commands
//! - Registering an account
//! - Logging in
//! - Updating the caller's profile
//!
//! ## Queries
//! - Current user
//! - Publishing rights

mod get_current_user;
mod get_publishing_rights;
mod login;
mod register;
mod update_profile;

// Commands
pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use register::{RegisterCommand, RegisterHandler, RegisterResult};
pub use update_profile::{UpdateProfileCommand, UpdateProfileHandler};

// Queries
pub use get_current_user::{GetCurrentUserHandler, GetCurrentUserQuery};
pub use get_publishing_rights::{GetPublishingRightsHandler, GetPublishingRightsQuery};
