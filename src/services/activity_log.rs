use std::sync::Arc;
use chrono::Utc;
use tokio::sync::Mutex;
use crate::models::{LoginAction, LoginLogEntry};

/// Append-only login/logout history. Memory only, unbounded.
#[derive(Clone, Default)]
pub struct ActivityLog {
    entries: Arc<Mutex<Vec<LoginLogEntry>>>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record_login(&self, username: &str) {
        self.record(username, LoginAction::Login).await;
    }

    pub async fn record_logout(&self, username: &str) {
        self.record(username, LoginAction::Logout).await;
    }

    async fn record(&self, username: &str, action: LoginAction) {
        let entry = LoginLogEntry {
            username: username.to_string(),
            action,
            time: Utc::now(),
        };
        tracing::info!(user = %entry.username, action = ?entry.action, "activity recorded");
        self.entries.lock().await.push(entry);
    }

    pub async fn entries(&self) -> Vec<LoginLogEntry> {
        self.entries.lock().await.clone()
    }
}
