use serde::{Deserialize, Serialize};

use super::new_uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub category: String,
    pub rating: f64,
    pub orders: u32,
    /// `open` or `closed`
    pub status: String,
    /// Platform commission, percent
    pub commission: f64,
    #[serde(default)]
    pub image: String,
}

fn default_commission() -> f64 {
    15.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
    pub category: String,
    #[serde(default = "default_commission")]
    pub commission: f64,
    #[serde(default)]
    pub image: Option<String>,
}

impl From<RestaurantCreate> for Restaurant {
    fn from(req: RestaurantCreate) -> Self {
        Self {
            id: new_uuid(),
            name: req.name,
            category: req.category,
            rating: 5.0,
            orders: 0,
            status: "open".to_string(),
            commission: req.commission,
            image: req.image.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commission_defaults_to_fifteen() {
        let req: RestaurantCreate =
            serde_json::from_str(r#"{"name": "مطعم البيت", "category": "عربي"}"#).unwrap();
        let restaurant = Restaurant::from(req);
        assert_eq!(restaurant.commission, 15.0);
        assert_eq!(restaurant.status, "open");
    }
}
