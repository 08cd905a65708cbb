use serde::{Deserialize, Serialize};

use super::short_id;

/// A discount code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: String,
    pub code: String,
    pub discount: f64,
    /// `percentage` or `fixed`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "maxUses")]
    pub max_uses: u32,
    pub used: u32,
    pub status: String,
    pub expires: String,
    /// `all`, `rides` or `delivery`
    pub service: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromotionCreate {
    pub code: String,
    pub discount: f64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "maxUses")]
    pub max_uses: u32,
    pub expires: String,
    pub service: String,
}

impl From<PromotionCreate> for Promotion {
    fn from(req: PromotionCreate) -> Self {
        Self {
            id: short_id('P'),
            code: req.code,
            discount: req.discount,
            kind: req.kind,
            max_uses: req.max_uses,
            used: 0,
            status: "active".to_string(),
            expires: req.expires,
            service: req.service,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromotionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, rename = "maxUses", skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_names() {
        let req: PromotionCreate = serde_json::from_value(json!({
            "code": "RIDE25",
            "discount": 25,
            "type": "fixed",
            "maxUses": 500,
            "expires": "2025-02-15",
            "service": "rides"
        }))
        .unwrap();

        let value = serde_json::to_value(Promotion::from(req)).unwrap();
        assert_eq!(value["type"], "fixed");
        assert_eq!(value["maxUses"], 500);
        assert_eq!(value["used"], 0);
        assert_eq!(value["status"], "active");
        assert!(value["id"].as_str().unwrap().starts_with('P'));
    }

    #[test]
    fn test_update_uses_wire_names() {
        let update: PromotionUpdate =
            serde_json::from_value(json!({"maxUses": 10, "type": "percentage"})).unwrap();
        let fields = crate::models::update_fields(&update).unwrap();
        assert_eq!(fields["maxUses"], 10);
        assert_eq!(fields["type"], "percentage");
        assert_eq!(fields.len(), 2);
    }
}
