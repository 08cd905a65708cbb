use serde::{Deserialize, Serialize};

use super::{now_minute, short_id};

/// A food delivery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user: String,
    pub restaurant: String,
    /// Number of items
    pub items: u32,
    pub total: f64,
    /// `preparing`, `on_way`, `delivered` or `cancelled`
    pub status: String,
    pub date: String,
    /// Assigned driver name, `-` when unassigned
    pub driver: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderCreate {
    pub user: String,
    pub restaurant: String,
    pub items: u32,
    pub total: f64,
}

impl From<OrderCreate> for Order {
    fn from(req: OrderCreate) -> Self {
        Self {
            id: short_id('O'),
            user: req.user,
            restaurant: req.restaurant,
            items: req.items,
            total: req.total,
            status: "preparing".to_string(),
            date: now_minute(),
            driver: "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderStatusQuery {
    pub status: String,
    #[serde(default)]
    pub driver: Option<String>,
}
