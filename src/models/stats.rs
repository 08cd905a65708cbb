//! Dashboard statistics.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::{Collection, Document, DocumentStore};

/// Month-over-month growth shown on the dashboard. Not computed.
const MONTHLY_GROWTH: f64 = 12.5;

const WEEK_DAYS: [&str; 7] = [
    "السبت",
    "الأحد",
    "الإثنين",
    "الثلاثاء",
    "الأربعاء",
    "الخميس",
    "الجمعة",
];

const MONTHS: [&str; 6] = ["يناير", "فبراير", "مارس", "أبريل", "مايو", "يونيو"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_users: usize,
    pub total_drivers: usize,
    pub total_restaurants: usize,
    pub total_rides: usize,
    pub total_orders: usize,
    /// Sum of delivered order totals
    pub total_revenue: f64,
    /// Drivers currently `online`
    pub active_drivers: usize,
    /// Orders `preparing` or `on_way`
    pub pending_orders: usize,
    pub today_rides: usize,
    pub today_orders: usize,
    pub monthly_growth: f64,
    /// Mean driver rating, one decimal
    pub average_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyPoint {
    pub day: String,
    pub rides: usize,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub month: String,
    pub revenue: u64,
}

fn field_str<'a>(doc: &'a Document, field: &str) -> Option<&'a str> {
    doc.get(field).and_then(Value::as_str)
}

fn field_f64(doc: &Document, field: &str) -> f64 {
    doc.get(field).and_then(Value::as_f64).unwrap_or(0.0)
}

fn dated_on(docs: &[Document], day: &str) -> usize {
    docs.iter()
        .filter(|d| field_str(d, "date").is_some_and(|date| date.starts_with(day)))
        .count()
}

/// Computes dashboard statistics. `today` is a `YYYY-MM-DD` date prefix.
///
/// # Errors
///
/// Returns an error if a collection cannot be read.
pub async fn compute(store: &DocumentStore, today: &str) -> Result<Stats> {
    let drivers = store.find_all(Collection::Drivers, usize::MAX).await?;
    let rides = store.find_all(Collection::Rides, usize::MAX).await?;
    let orders = store.find_all(Collection::Orders, usize::MAX).await?;

    let total_revenue = orders
        .iter()
        .filter(|o| field_str(o, "status") == Some("delivered"))
        .map(|o| field_f64(o, "total"))
        .sum();

    let active_drivers = drivers
        .iter()
        .filter(|d| field_str(d, "status") == Some("online"))
        .count();

    let pending_orders = orders
        .iter()
        .filter(|o| matches!(field_str(o, "status"), Some("preparing" | "on_way")))
        .count();

    let rating_sum: f64 = drivers.iter().map(|d| field_f64(d, "rating")).sum();
    let average_rating = rating_sum / drivers.len().max(1) as f64;

    Ok(Stats {
        total_users: store.count(Collection::Users).await?,
        total_drivers: drivers.len(),
        total_restaurants: store.count(Collection::Restaurants).await?,
        total_rides: rides.len(),
        total_orders: orders.len(),
        total_revenue,
        active_drivers,
        pending_orders,
        today_rides: dated_on(&rides, today),
        today_orders: dated_on(&orders, today),
        monthly_growth: MONTHLY_GROWTH,
        average_rating: (average_rating * 10.0).round() / 10.0,
    })
}

/// Weekly chart series derived from ride and order totals.
///
/// # Errors
///
/// Returns an error if a collection cannot be counted.
pub async fn weekly(store: &DocumentStore) -> Result<Vec<WeeklyPoint>> {
    let rides = store.count(Collection::Rides).await?;
    let orders = store.count(Collection::Orders).await?;

    Ok(WEEK_DAYS
        .iter()
        .enumerate()
        .map(|(i, day)| WeeklyPoint {
            day: (*day).to_string(),
            rides: rides / 7 + i * 50,
            orders: orders / 7 + i * 30,
        })
        .collect())
}

/// Monthly revenue chart series.
pub fn monthly() -> Vec<MonthlyPoint> {
    MONTHS
        .iter()
        .zip(0u64..)
        .map(|(month, i)| MonthlyPoint {
            month: (*month).to_string(),
            revenue: 85_000 + i * 10_000,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seed;

    #[tokio::test]
    async fn test_stats_on_seed_data() {
        let store = DocumentStore::memory();
        seed::seed(&store).await.unwrap();

        let stats = compute(&store, "2024-12-15").await.unwrap();
        assert_eq!(stats.total_users, 5);
        assert_eq!(stats.total_drivers, 5);
        assert_eq!(stats.total_orders, 5);
        // O001 (125) + O005 (75)
        assert_eq!(stats.total_revenue, 200.0);
        assert_eq!(stats.active_drivers, 3);
        assert_eq!(stats.pending_orders, 2);
        assert_eq!(stats.today_rides, 5);
        assert_eq!(stats.today_orders, 5);
        // (4.8 + 4.6 + 4.9 + 4.4 + 4.7) / 5 = 4.68
        assert_eq!(stats.average_rating, 4.7);
        assert_eq!(stats.monthly_growth, 12.5);

        let other_day = compute(&store, "2024-12-16").await.unwrap();
        assert_eq!(other_day.today_rides, 0);
    }

    #[tokio::test]
    async fn test_stats_on_empty_store() {
        let stats = compute(&DocumentStore::memory(), "2024-12-15").await.unwrap();
        assert_eq!(stats.total_drivers, 0);
        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(stats.total_revenue, 0.0);
    }

    #[tokio::test]
    async fn test_weekly_series() {
        let store = DocumentStore::memory();
        seed::seed(&store).await.unwrap();

        let series = weekly(&store).await.unwrap();
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].day, "السبت");
        assert_eq!(series[0].rides, 0);
        assert_eq!(series[6].rides, 300);
        assert_eq!(series[6].orders, 180);
    }

    #[test]
    fn test_monthly_series() {
        let series = monthly();
        assert_eq!(series.len(), 6);
        assert_eq!(series[0].revenue, 85_000);
        assert_eq!(series[5].revenue, 135_000);
        assert_eq!(series[5].month, "يونيو");
    }

    #[test]
    fn test_camel_case_wire_names() {
        let value = serde_json::to_value(Stats {
            total_users: 1,
            total_drivers: 0,
            total_restaurants: 0,
            total_rides: 0,
            total_orders: 0,
            total_revenue: 0.0,
            active_drivers: 0,
            pending_orders: 0,
            today_rides: 0,
            today_orders: 0,
            monthly_growth: 12.5,
            average_rating: 0.0,
        })
        .unwrap();
        assert_eq!(value["totalUsers"], 1);
        assert_eq!(value["monthlyGrowth"], 12.5);
    }
}
