//! ML domain module.
//!
//! Feature vectors for the clustering, churn and dynamic-pricing models.

mod features;

pub use features::{ChurnFeatures, ClusterFeatures, PricingFeatures, UserActivity};
