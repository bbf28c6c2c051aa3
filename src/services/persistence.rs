//! Backends that mirror the job collection somewhere durable.
//!
//! Every save overwrites the whole document; there is no append or journaling.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::fs;
use tokio::sync::Mutex;
use crate::errors::{StoreError, StoreResult};
use crate::models::Job;

#[async_trait]
pub trait JobPersistence: Send + Sync {
    /// Read the full collection. A backend with nothing stored yet returns an empty list.
    async fn load(&self) -> StoreResult<Vec<Job>>;

    /// Replace the stored collection with `jobs`.
    async fn save(&self, jobs: &[Job]) -> StoreResult<()>;
}

/// Pretty-printed JSON array on local disk.
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl JobPersistence for JsonFilePersistence {
    async fn load(&self) -> StoreResult<Vec<Job>> {
        match fs::read_to_string(&self.path).await {
            Ok(data) => {
                let jobs: Vec<Job> = serde_json::from_str(&data)?;
                tracing::info!("Loaded {} jobs from {}", jobs.len(), self.path.display());
                Ok(jobs)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("No jobs file at {}, starting empty", self.path.display());
                Ok(Vec::new())
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn save(&self, jobs: &[Job]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let data = serde_json::to_string_pretty(jobs)?;
        fs::write(&self.path, data).await?;

        tracing::debug!("Wrote {} jobs to {}", jobs.len(), self.path.display());
        Ok(())
    }
}

/// Keeps the "file" in memory. Lets tests exercise the store without disk I/O
/// and simulate write failures.
#[derive(Default)]
pub struct InMemoryPersistence {
    saved: Mutex<Vec<Job>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        Self {
            saved: Mutex::new(jobs),
            ..Self::default()
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> Vec<Job> {
        self.saved.lock().await.clone()
    }
}

#[async_trait]
impl JobPersistence for InMemoryPersistence {
    async fn load(&self) -> StoreResult<Vec<Job>> {
        Ok(self.saved.lock().await.clone())
    }

    async fn save(&self, jobs: &[Job]) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::new(
                ErrorKind::Other,
                "simulated write failure",
            )));
        }
        *self.saved.lock().await = jobs.to_vec();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
