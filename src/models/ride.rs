use serde::{Deserialize, Serialize};

use super::{now_minute, short_id};
use crate::store::Document;

/// A ride as stored. The API exposes the locations as `from` / `to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    pub id: String,
    pub user: String,
    pub driver: String,
    pub from_location: String,
    pub to_location: String,
    /// `pending`, `in_progress`, `completed` or `cancelled`
    pub status: String,
    pub fare: f64,
    pub date: String,
    pub duration: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RideCreate {
    pub user: String,
    pub driver: String,
    #[serde(alias = "from")]
    pub from_location: String,
    #[serde(alias = "to")]
    pub to_location: String,
    pub fare: f64,
}

impl From<RideCreate> for Ride {
    fn from(req: RideCreate) -> Self {
        Self {
            id: short_id('R'),
            user: req.user,
            driver: req.driver,
            from_location: req.from_location,
            to_location: req.to_location,
            status: "pending".to_string(),
            fare: req.fare,
            date: now_minute(),
            duration: "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RideStatusQuery {
    pub status: String,
}

/// Renames stored location fields to their API names.
pub fn expose_ride(mut doc: Document) -> Document {
    if let Some(from) = doc.remove("from_location") {
        doc.insert("from".to_string(), from);
    }
    if let Some(to) = doc.remove("to_location") {
        doc.insert("to".to_string(), to);
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_expose_renames_locations() {
        let doc = json!({"id": "R001", "from_location": "حي الملز", "to_location": "مطار الملك خالد"});
        let exposed = expose_ride(doc.as_object().cloned().unwrap());
        assert_eq!(exposed["from"], "حي الملز");
        assert_eq!(exposed["to"], "مطار الملك خالد");
        assert!(!exposed.contains_key("from_location"));
        assert!(!exposed.contains_key("to_location"));
    }

    #[test]
    fn test_create_accepts_short_location_names() {
        let req: RideCreate = serde_json::from_value(json!({
            "user": "أحمد محمد",
            "driver": "عبدالله السعيد",
            "from": "حي الورود",
            "to": "حي العليا",
            "fare": 35
        }))
        .unwrap();
        let ride = Ride::from(req);
        assert_eq!(ride.from_location, "حي الورود");
        assert_eq!(ride.status, "pending");
        assert_eq!(ride.duration, "-");
        assert!(ride.id.starts_with('R'));
    }
}
