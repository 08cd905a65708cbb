//! Typed records for the admin API.
//!
//! Handlers deserialize request bodies into the `*Create` / `*Update` types
//! here and build stored records from them. Backup and restore never go
//! through these types, so unknown stored fields are left alone.

mod admin;
mod driver;
mod order;
mod promotion;
mod restaurant;
mod ride;
pub mod seed;
pub mod stats;
mod user;

pub use admin::{Admin, AdminProfile, LoginRequest, LoginResponse};
pub use driver::{Driver, DriverCreate, DriverUpdate};
pub use order::{Order, OrderCreate, OrderStatusQuery};
pub use promotion::{Promotion, PromotionCreate, PromotionUpdate};
pub use restaurant::{Restaurant, RestaurantCreate, RestaurantUpdate};
pub use ride::{Ride, RideCreate, RideStatusQuery, expose_ride};
pub use user::{User, UserCreate, UserUpdate};

use chrono::Utc;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::store::{Document, to_document};

/// Random UUID v4 id, used for users, drivers, restaurants and admins.
pub fn new_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// `prefix` followed by six upper-case hex characters, e.g. `R1A2B3C`.
pub fn short_id(prefix: char) -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}{}", hex[..6].to_uppercase())
}

/// Today's date in UTC, `YYYY-MM-DD`.
pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Current UTC time at minute resolution, `YYYY-MM-DD HH:MM`.
pub fn now_minute() -> String {
    Utc::now().format("%Y-%m-%d %H:%M").to_string()
}

/// Serializes a partial update, rejecting one with no fields set.
///
/// Update types skip `None` fields when serializing, so the resulting
/// document holds exactly the fields to merge.
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] when no field is set.
pub fn update_fields<T: Serialize>(update: &T) -> Result<Document> {
    let fields = to_document(update)?;
    if fields.is_empty() {
        return Err(Error::InvalidRequest("No data to update".to_string()));
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id_format() {
        let id = short_id('R');
        assert_eq!(id.len(), 7);
        assert!(id.starts_with('R'));
        assert!(
            id[1..]
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        );
    }

    #[test]
    fn test_date_formats() {
        assert_eq!(today().len(), "2024-12-15".len());
        assert_eq!(now_minute().len(), "2024-12-15 14:30".len());
        assert!(now_minute().starts_with(&today()));
    }

    #[test]
    fn test_update_fields_rejects_empty() {
        let err = update_fields(&UserUpdate::default()).unwrap_err();
        assert_eq!(err.to_string(), "No data to update");

        let update = UserUpdate {
            status: Some("blocked".to_string()),
            ..Default::default()
        };
        let fields = update_fields(&update).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["status"], "blocked");
    }
}
