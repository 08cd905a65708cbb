use serde::{Deserialize, Serialize};

use super::new_uuid;
use crate::auth::hash_password;
use crate::constants::{BOOTSTRAP_ADMIN_EMAIL, BOOTSTRAP_ADMIN_NAME, BOOTSTRAP_ADMIN_PASSWORD};

/// An administrator account as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Hex SHA-256 of the password
    pub password: String,
    pub role: String,
}

impl Admin {
    /// The super admin created on the first login with the bootstrap credentials.
    pub fn bootstrap() -> Self {
        Self {
            id: new_uuid(),
            name: BOOTSTRAP_ADMIN_NAME.to_string(),
            email: BOOTSTRAP_ADMIN_EMAIL.to_string(),
            password: hash_password(BOOTSTRAP_ADMIN_PASSWORD),
            role: "super_admin".to_string(),
        }
    }

    /// True if the credentials are the bootstrap credentials.
    pub fn is_bootstrap_login(email: &str, password: &str) -> bool {
        email == BOOTSTRAP_ADMIN_EMAIL && password == BOOTSTRAP_ADMIN_PASSWORD
    }
}

/// An admin without the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<Admin> for AdminProfile {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            name: admin.name,
            email: admin.email,
            role: admin.role,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;

    #[test]
    fn test_bootstrap_admin() {
        let admin = Admin::bootstrap();
        assert_eq!(admin.role, "super_admin");
        assert!(verify_password("admin123", &admin.password));
        assert!(Admin::is_bootstrap_login("admin@transfers.com", "admin123"));
        assert!(!Admin::is_bootstrap_login("admin@transfers.com", "admin"));
    }

    #[test]
    fn test_profile_has_no_password() {
        let value = serde_json::to_value(AdminProfile::from(Admin::bootstrap())).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["email"], "admin@transfers.com");
    }
}
