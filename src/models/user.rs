use serde::{Deserialize, Serialize};

use super::{new_uuid, today};

/// A rider / customer account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub rides: u32,
    #[serde(default)]
    pub orders: u32,
    #[serde(default)]
    pub joined: String,
    #[serde(default)]
    pub avatar: String,
}

fn default_status() -> String {
    "active".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl From<UserCreate> for User {
    fn from(req: UserCreate) -> Self {
        Self {
            id: new_uuid(),
            name: req.name,
            email: req.email,
            phone: req.phone,
            status: default_status(),
            rides: 0,
            orders: 0,
            joined: today(),
            avatar: req.avatar.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}
