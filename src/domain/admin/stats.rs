//! Dashboard aggregates for administrators.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::account::User;
use crate::domain::foundation::Timestamp;
use crate::domain::listing::Property;
use crate::domain::review::{ReportStatus, Review};

pub const TOP_CITIES: usize = 5;
pub const KPI_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    /// `YYYY-MM`.
    pub month: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityCount {
    pub city: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanCount {
    pub plan: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub property_type: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    /// `DD/MM`, as the dashboard charts label it.
    pub date: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_properties: i64,
    pub total_users: i64,
    pub total_reviews: i64,
    pub avg_rating: Option<f64>,
    pub monthly_signups: Vec<MonthlyCount>,
    pub top_cities: Vec<CityCount>,
    pub plan_sales: Vec<PlanCount>,
    pub properties_by_type: Vec<TypeCount>,
}

impl AdminStats {
    /// Aggregates over fully loaded collections.
    pub fn compute(users: &[User], properties: &[Property], reviews: &[Review]) -> Self {
        let mut monthly: BTreeMap<String, i64> = BTreeMap::new();
        for user in users {
            *monthly
                .entry(user.created_at.as_datetime().format("%Y-%m").to_string())
                .or_default() += 1;
        }

        let mut cities: BTreeMap<&str, i64> = BTreeMap::new();
        let mut types: BTreeMap<&'static str, i64> = BTreeMap::new();
        for property in properties {
            *cities.entry(property.city.as_str()).or_default() += 1;
            *types.entry(property.property_type.as_str()).or_default() += 1;
        }
        let mut top_cities: Vec<CityCount> = cities
            .into_iter()
            .map(|(city, count)| CityCount {
                city: city.to_string(),
                count,
            })
            .collect();
        top_cities.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.city.cmp(&b.city)));
        top_cities.truncate(TOP_CITIES);

        let mut plans: BTreeMap<&'static str, i64> = BTreeMap::new();
        for plan in users.iter().filter_map(|u| u.subscription_plan) {
            *plans.entry(plan.as_str()).or_default() += 1;
        }

        let avg_rating = if reviews.is_empty() {
            None
        } else {
            Some(reviews.iter().map(|r| r.rating as f64).sum::<f64>() / reviews.len() as f64)
        };

        Self {
            total_properties: properties.len() as i64,
            total_users: users.len() as i64,
            total_reviews: reviews.len() as i64,
            avg_rating,
            monthly_signups: monthly
                .into_iter()
                .map(|(month, count)| MonthlyCount { month, count })
                .collect(),
            top_cities,
            plan_sales: plans
                .into_iter()
                .map(|(plan, count)| PlanCount {
                    plan: plan.to_string(),
                    count,
                })
                .collect(),
            properties_by_type: types
                .into_iter()
                .map(|(t, count)| TypeCount {
                    property_type: t.to_string(),
                    count,
                })
                .collect(),
        }
    }
}

/// Per-day growth over the last [`KPI_WINDOW_DAYS`] days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub signups: Vec<DailyCount>,
    pub announcements: Vec<DailyCount>,
}

impl Kpis {
    pub fn compute<S, A>(signups: S, announcements: A, now: Timestamp) -> Self
    where
        S: IntoIterator<Item = Timestamp>,
        A: IntoIterator<Item = Timestamp>,
    {
        let since = now.minus_days(KPI_WINDOW_DAYS);
        Self {
            signups: daily_counts(signups, since),
            announcements: daily_counts(announcements, since),
        }
    }
}

/// Counts instants per calendar day from `since` on, oldest day first.
pub fn daily_counts<I>(instants: I, since: Timestamp) -> Vec<DailyCount>
where
    I: IntoIterator<Item = Timestamp>,
{
    let mut days: BTreeMap<chrono::NaiveDate, i64> = BTreeMap::new();
    for at in instants.into_iter().filter(|at| !at.is_before(&since)) {
        *days.entry(at.date()).or_default() += 1;
    }
    days.into_iter()
        .map(|(day, count)| DailyCount {
            date: day.format("%d/%m").to_string(),
            count,
        })
        .collect()
}

/// Admin decision on a review report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportModeration {
    pub status: ReportStatus,
    #[serde(default)]
    pub moderator_notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::user::test_user;
    use crate::domain::account::SubscriptionPlan;
    use crate::domain::foundation::{PropertyId, UserId};
    use crate::domain::listing::property::sample_new_property;
    use crate::domain::review::record::sample_review;

    fn listing(id: i32, city: &str) -> Property {
        let mut new = sample_new_property();
        new.city = city.to_string();
        new.into_property(PropertyId::from_raw(id), UserId::from_raw(1), Timestamp::now())
    }

    #[test]
    fn stats_count_everything() {
        let mut premium = test_user(1);
        premium.subscription_plan = Some(SubscriptionPlan::Premium);
        let users = vec![premium, test_user(2)];
        let properties = vec![listing(1, "Roma"), listing(2, "Milano"), listing(3, "Roma")];
        let mut low = sample_review(2, 2, 1);
        low.rating = 2;
        let reviews = vec![sample_review(1, 1, 1), low];

        let stats = AdminStats::compute(&users, &properties, &reviews);
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.total_properties, 3);
        assert_eq!(stats.avg_rating, Some(3.0));
        assert_eq!(stats.top_cities[0].city, "Roma");
        assert_eq!(stats.top_cities[0].count, 2);
        assert_eq!(stats.plan_sales, vec![PlanCount { plan: "premium".into(), count: 1 }]);
        assert_eq!(stats.monthly_signups.iter().map(|m| m.count).sum::<i64>(), 2);
    }

    #[test]
    fn top_cities_are_capped() {
        let properties: Vec<Property> = ["A", "B", "C", "D", "E", "F"]
            .iter()
            .enumerate()
            .map(|(i, c)| listing(i as i32 + 1, c))
            .collect();
        let stats = AdminStats::compute(&[], &properties, &[]);
        assert_eq!(stats.top_cities.len(), TOP_CITIES);
        assert_eq!(stats.avg_rating, None);
    }

    #[test]
    fn daily_counts_skip_old_entries() {
        let now = Timestamp::now();
        let instants = vec![now, now, now.minus_days(1), now.minus_days(40)];
        let counts = daily_counts(instants, now.minus_days(KPI_WINDOW_DAYS));
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.iter().map(|c| c.count).sum::<i64>(), 3);
        assert_eq!(counts[1].date, now.date().format("%d/%m").to_string());
    }

    #[test]
    fn type_count_serializes_as_type() {
        let json = serde_json::to_value(TypeCount {
            property_type: "bilocale".into(),
            count: 1,
        })
        .unwrap();
        assert_eq!(json["type"], "bilocale");
    }
}
