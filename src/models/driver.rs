use serde::{Deserialize, Serialize};

use super::new_uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub vehicle: String,
    pub plate: String,
    /// `online`, `busy` or `offline`
    pub status: String,
    pub rating: f64,
    pub rides: u32,
    pub earnings: f64,
    pub verified: bool,
    #[serde(default)]
    pub avatar: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DriverCreate {
    pub name: String,
    pub phone: String,
    pub vehicle: String,
    pub plate: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl From<DriverCreate> for Driver {
    fn from(req: DriverCreate) -> Self {
        Self {
            id: new_uuid(),
            name: req.name,
            phone: req.phone,
            vehicle: req.vehicle,
            plate: req.plate,
            status: "offline".to_string(),
            rating: 5.0,
            rides: 0,
            earnings: 0.0,
            verified: false,
            avatar: req.avatar.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriverUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}
