use serde::Deserialize;
use std::path::PathBuf;
use crate::models::{Role, User};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub storage: StorageConfig,
    pub jobs: JobsConfig,
    pub limits: LimitsConfig,
    // Replaces the built-in accounts when set
    pub users: Option<Vec<User>>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub templates_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            templates_dir: PathBuf::from("templates"),
            static_dir: PathBuf::from("static"),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "session".to_string(),
            secure: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub jobs_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            jobs_file: PathBuf::from("data/jobs.json"),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct JobsConfig {
    pub default_assignee: String,  // Every new job goes to this worker
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            default_assignee: "deliveryguy".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_body_size: usize,  // in bytes
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::Environment::with_prefix("APP").prefix_separator("_").separator("__"))
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// New jobs must land on an account that can see them.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        let assignee = &self.jobs.default_assignee;
        let assignable = self
            .users()
            .iter()
            .any(|u| &u.username == assignee && u.role == Role::DeliveryGuy);

        if assignable {
            Ok(())
        } else {
            Err(config::ConfigError::Message(format!(
                "jobs.default_assignee '{}' is not a configured deliveryguy user",
                assignee
            )))
        }
    }

    pub fn users(&self) -> Vec<User> {
        self.users.clone().unwrap_or_else(default_users)
    }
}

pub fn default_users() -> Vec<User> {
    vec![
        User::new("manager", "manager123", Role::Manager),
        User::new("deliveryguy", "delivery123", Role::DeliveryGuy),
    ]
}
