//! Rent suggestions derived from stored statistics.

use serde::Serialize;

use crate::domain::foundation::Timestamp;
use crate::domain::listing::PropertyType;

use super::PriceStat;

/// How much the suggestion can be trusted, based on sample size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Alta,
    Media,
    Bassa,
}

impl Confidence {
    pub fn from_sample_size(n: i32) -> Self {
        if n > 20 {
            Confidence::Alta
        } else if n > 5 {
            Confidence::Media
        } else {
            Confidence::Bassa
        }
    }
}

/// Suggested rent range for a location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSuggestion {
    pub available: bool,
    /// False when only the city-wide fallback was found.
    pub is_exact: bool,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    pub average_price: i32,
    pub median_price: i32,
    pub min_price: i32,
    pub max_price: i32,
    pub suggested_min: i32,
    pub suggested_max: i32,
    pub confidence: Confidence,
    pub sample_size: i32,
    pub last_updated: Timestamp,
}

impl PriceSuggestion {
    /// Mean ± one deviation, clamped to the observed range and rounded to
    /// the nearest 10 euros.
    pub fn from_stat(stat: &PriceStat, is_exact: bool) -> Self {
        let lower = stat.min_price.max(stat.average_price.saturating_sub(stat.std_dev));
        let upper = stat.max_price.min(stat.average_price.saturating_add(stat.std_dev));
        Self {
            available: true,
            is_exact,
            city: stat.city.clone(),
            zone: stat.zone.clone(),
            property_type: stat.property_type,
            average_price: stat.average_price,
            median_price: stat.median_price,
            min_price: stat.min_price,
            max_price: stat.max_price,
            suggested_min: round_to_ten(lower),
            suggested_max: round_to_ten(upper),
            confidence: Confidence::from_sample_size(stat.sample_size),
            sample_size: stat.sample_size,
            last_updated: stat.last_updated,
        }
    }
}

fn round_to_ten(value: i32) -> i32 {
    ((value as f64 / 10.0).round() * 10.0) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(avg: i32, sd: i32, min: i32, max: i32, n: i32) -> PriceStat {
        PriceStat {
            city: "Milano".into(),
            zone: None,
            property_type: None,
            average_price: avg,
            min_price: min,
            max_price: max,
            median_price: avg,
            std_dev: sd,
            sample_size: n,
            last_updated: Timestamp::now(),
        }
    }

    #[test]
    fn range_is_mean_plus_minus_deviation_rounded() {
        let s = PriceSuggestion::from_stat(&stat(553, 124, 300, 900, 10), true);
        assert_eq!(s.suggested_min, 430);
        assert_eq!(s.suggested_max, 680);
        assert!(s.is_exact);
    }

    #[test]
    fn range_is_clamped_to_observed_prices() {
        let s = PriceSuggestion::from_stat(&stat(500, 300, 420, 610, 3), false);
        assert_eq!(s.suggested_min, 420);
        assert_eq!(s.suggested_max, 610);
    }

    #[test]
    fn extreme_prices_do_not_overflow() {
        let top = PriceSuggestion::from_stat(&stat(i32::MAX - 5, 1_000, i32::MAX - 2_000, i32::MAX, 3), true);
        assert_eq!(top.suggested_max, i32::MAX);
        assert!(top.suggested_min <= top.suggested_max);

        let bottom = PriceSuggestion::from_stat(&stat(i32::MIN + 5, 1_000, i32::MIN, 0, 3), true);
        assert_eq!(bottom.suggested_min, i32::MIN);
    }

    #[test]
    fn confidence_depends_on_sample_size() {
        assert_eq!(Confidence::from_sample_size(21), Confidence::Alta);
        assert_eq!(Confidence::from_sample_size(20), Confidence::Media);
        assert_eq!(Confidence::from_sample_size(6), Confidence::Media);
        assert_eq!(Confidence::from_sample_size(5), Confidence::Bassa);
    }

    #[test]
    fn serializes_with_frontend_field_names() {
        let json = serde_json::to_value(PriceSuggestion::from_stat(&stat(500, 50, 400, 600, 30), true)).unwrap();
        assert_eq!(json["suggestedMin"], 450);
        assert_eq!(json["confidence"], "alta");
        assert!(json.get("zone").is_none());
    }
}
