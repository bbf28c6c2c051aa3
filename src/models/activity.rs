use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoginAction {
    Login,
    Logout,
}

#[derive(Debug, Serialize, Clone)]
pub struct LoginLogEntry {
    pub username: String,
    pub action: LoginAction,
    pub time: DateTime<Utc>,
}
