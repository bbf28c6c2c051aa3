//! The authoritative job collection and its lifecycle.
//!
//! The in-memory list is the source of truth for reads. Every mutation
//! rewrites the whole collection through the configured [`JobPersistence`]
//! backend while holding the store lock.
//!
//! A failed write is reported to the caller but the in-memory change is kept,
//! so memory and disk can disagree until the next successful write.

use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;
use crate::errors::StoreResult;
use crate::models::{Job, JobFilter, JobStatus, NewJob};
use super::persistence::JobPersistence;

#[derive(Clone)]
pub struct JobStore {
    jobs: Arc<Mutex<Vec<Job>>>,
    backend: Arc<dyn JobPersistence>,
    default_assignee: Arc<str>,
}

impl JobStore {
    /// Load the collection from `backend`. Any failure other than "nothing stored yet" propagates.
    pub async fn load(
        backend: Arc<dyn JobPersistence>,
        default_assignee: &str,
    ) -> StoreResult<Self> {
        let jobs = backend.load().await?;
        Ok(Self {
            jobs: Arc::new(Mutex::new(jobs)),
            backend,
            default_assignee: Arc::from(default_assignee),
        })
    }

    pub async fn list_all(&self) -> Vec<Job> {
        self.jobs.lock().await.clone()
    }

    pub async fn filter(&self, filter: JobFilter<'_>) -> Vec<Job> {
        self.jobs
            .lock()
            .await
            .iter()
            .filter(|job| filter.matches(job))
            .cloned()
            .collect()
    }

    /// Like [`JobStore::filter`], paired with each job's position in the full collection.
    pub async fn filter_with_positions(&self, filter: JobFilter<'_>) -> Vec<(usize, Job)> {
        self.jobs
            .lock()
            .await
            .iter()
            .enumerate()
            .filter(|(_, job)| filter.matches(job))
            .map(|(index, job)| (index, job.clone()))
            .collect()
    }

    pub async fn create(&self, new_job: NewJob) -> StoreResult<Job> {
        let job = Job {
            id: Uuid::new_v4().to_string(),
            contact_name: new_job.contact_name,
            location: new_job.location,
            contact_info: new_job.contact_info,
            job_description: new_job.job_description,
            assigned_to: self.default_assignee.to_string(),
            status: JobStatus::Pending,
        };

        let mut jobs = self.jobs.lock().await;
        jobs.push(job.clone());
        // No rollback if this fails
        self.backend.save(&jobs).await?;

        tracing::info!("Job {} assigned to {} and saved", job.id, job.assigned_to);
        Ok(job)
    }

    /// Overwrite the status of job `id` with whatever the caller sent.
    /// Returns `false` without writing when no job has that id.
    pub async fn update_status(&self, id: &str, status: impl Into<JobStatus>) -> StoreResult<bool> {
        let mut jobs = self.jobs.lock().await;
        let Some(job) = jobs.iter_mut().find(|job| job.id == id) else {
            tracing::debug!("Status update for unknown job {}", id);
            return Ok(false);
        };

        job.status = status.into();
        let new_status = job.status.clone();
        self.backend.save(&jobs).await?;

        tracing::info!("Job {} status updated to {} and saved", id, new_status);
        Ok(true)
    }

    /// Remove the job at `index`. Out-of-range indexes are a no-op.
    ///
    /// The index is positional, so a client holding a stale page can remove a
    /// different job than the one it displayed.
    pub async fn delete(&self, index: usize) -> StoreResult<bool> {
        let mut jobs = self.jobs.lock().await;
        if index >= jobs.len() {
            tracing::debug!("Delete index {} out of range ({} jobs)", index, jobs.len());
            return Ok(false);
        }

        let removed = jobs.remove(index);
        self.backend.save(&jobs).await?;

        tracing::info!("Job {} at index {} deleted and saved", removed.id, index);
        Ok(true)
    }

    pub async fn delete_by_id(&self, id: &str) -> StoreResult<bool> {
        let mut jobs = self.jobs.lock().await;
        let Some(index) = jobs.iter().position(|job| job.id == id) else {
            tracing::debug!("Delete for unknown job {}", id);
            return Ok(false);
        };

        jobs.remove(index);
        self.backend.save(&jobs).await?;

        tracing::info!("Job {} deleted and saved", id);
        Ok(true)
    }
}
