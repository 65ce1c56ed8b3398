//! Price statistics over active listings.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::foundation::Timestamp;
use crate::domain::listing::{Property, PropertyType};

/// Aggregated rent statistics for a location, optionally narrowed by zone
/// and property type. A row with neither is the city-wide aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceStat {
    pub city: String,
    pub zone: Option<String>,
    pub property_type: Option<PropertyType>,
    pub average_price: i32,
    pub min_price: i32,
    pub max_price: i32,
    pub median_price: i32,
    pub std_dev: i32,
    pub sample_size: i32,
    pub last_updated: Timestamp,
}

impl PriceStat {
    pub fn is_city_wide(&self) -> bool {
        self.zone.is_none() && self.property_type.is_none()
    }
}

/// Computes rounded statistics for one group of prices.
///
/// Returns `None` for an empty sample.
pub fn summarize(
    city: &str,
    zone: Option<&str>,
    property_type: Option<PropertyType>,
    prices: &[i32],
    now: Timestamp,
) -> Option<PriceStat> {
    if prices.is_empty() {
        return None;
    }
    let mut sorted: Vec<f64> = prices.iter().map(|p| *p as f64).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    };
    let std_dev = if n > 1 {
        let var = sorted.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        var.sqrt()
    } else {
        0.0
    };

    Some(PriceStat {
        city: city.to_string(),
        zone: zone.map(str::to_string),
        property_type,
        average_price: mean.round() as i32,
        min_price: sorted[0].round() as i32,
        max_price: sorted[n - 1].round() as i32,
        median_price: median.round() as i32,
        std_dev: std_dev.round() as i32,
        sample_size: n as i32,
        last_updated: now,
    })
}

/// Computes every (city, zone, type) group plus one city-wide row per city.
///
/// Only active listings with a positive price contribute.
pub fn compute_price_stats(listings: &[Property], now: Timestamp) -> Vec<PriceStat> {
    type GroupKey = (String, Option<String>, Option<PropertyType>);
    let mut groups: BTreeMap<GroupKey, Vec<i32>> = BTreeMap::new();

    for p in listings.iter().filter(|p| p.is_active && p.price > 0) {
        let city = p.city.trim().to_string();
        if city.is_empty() {
            continue;
        }
        groups
            .entry((city.clone(), p.zone.clone(), Some(p.property_type)))
            .or_default()
            .push(p.price);
        groups.entry((city, None, None)).or_default().push(p.price);
    }

    groups
        .into_iter()
        .filter_map(|((city, zone, ty), prices)| summarize(&city, zone.as_deref(), ty, &prices, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{PropertyId, UserId};
    use crate::domain::listing::property::sample_new_property;
    use proptest::prelude::*;

    fn listing(city: &str, zone: Option<&str>, ty: PropertyType, price: i32) -> Property {
        let mut input = sample_new_property();
        input.city = city.to_string();
        input.zone = zone.map(str::to_string);
        input.property_type = ty;
        input.price = price;
        input.into_property(PropertyId::from_raw(1), UserId::from_raw(1), Timestamp::now())
    }

    #[test]
    fn summarize_computes_rounded_statistics() {
        let stat = summarize("Milano", None, None, &[400, 500, 600, 700], Timestamp::now()).unwrap();
        assert_eq!(stat.average_price, 550);
        assert_eq!(stat.median_price, 550);
        assert_eq!(stat.min_price, 400);
        assert_eq!(stat.max_price, 700);
        // sample std dev of 400..700 step 100 = 129.1
        assert_eq!(stat.std_dev, 129);
        assert_eq!(stat.sample_size, 4);
    }

    #[test]
    fn single_sample_has_zero_deviation() {
        let stat = summarize("Roma", None, None, &[800], Timestamp::now()).unwrap();
        assert_eq!(stat.std_dev, 0);
        assert_eq!(stat.median_price, 800);
    }

    #[test]
    fn empty_sample_has_no_statistics() {
        assert!(summarize("Roma", None, None, &[], Timestamp::now()).is_none());
    }

    #[test]
    fn groups_include_city_wide_rows() {
        let listings = vec![
            listing("Milano", Some("Navigli"), PropertyType::Bilocale, 900),
            listing("Milano", Some("Navigli"), PropertyType::Bilocale, 1100),
            listing("Milano", None, PropertyType::StanzaSingola, 500),
        ];
        let stats = compute_price_stats(&listings, Timestamp::now());

        let city_wide = stats.iter().find(|s| s.is_city_wide()).unwrap();
        assert_eq!(city_wide.sample_size, 3);
        assert_eq!(city_wide.average_price, 833);

        let navigli = stats
            .iter()
            .find(|s| s.zone.as_deref() == Some("Navigli"))
            .unwrap();
        assert_eq!(navigli.sample_size, 2);
        assert_eq!(navigli.property_type, Some(PropertyType::Bilocale));
        assert_eq!(stats.len(), 3);
    }

    #[test]
    fn inactive_listings_are_excluded() {
        let mut hidden = listing("Torino", None, PropertyType::Monolocale, 600);
        hidden.is_active = false;
        assert!(compute_price_stats(&[hidden], Timestamp::now()).is_empty());
    }

    proptest! {
        #[test]
        fn summary_values_stay_within_sample_range(prices in proptest::collection::vec(1i32..100_000, 1..60)) {
            let stat = summarize("X", None, None, &prices, Timestamp::now()).unwrap();
            prop_assert!(stat.min_price <= stat.median_price);
            prop_assert!(stat.median_price <= stat.max_price);
            prop_assert!(stat.min_price <= stat.average_price);
            prop_assert!(stat.average_price <= stat.max_price);
            prop_assert!(stat.std_dev >= 0);
            prop_assert_eq!(stat.sample_size as usize, prices.len());
        }
    }
}
