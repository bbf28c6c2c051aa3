use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    #[serde(rename = "deliveryguy")]
    DeliveryGuy,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Manager => write!(f, "manager"),
            Role::DeliveryGuy => write!(f, "deliveryguy"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password: String,  // Plaintext, compared as-is at login
    pub role: Role,
}

impl User {
    pub fn new(username: &str, password: &str, role: Role) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            role,
        }
    }

    // Where a freshly logged-in user lands
    pub fn home_path(&self) -> &'static str {
        match self.role {
            Role::Manager => "/manager",
            Role::DeliveryGuy => "/delivery-guy",
        }
    }
}
