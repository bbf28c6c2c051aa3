use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a delivery job.
///
/// Anything other than `pending` or `complete` is kept verbatim in `Other`,
/// so a status posted by a client is written back to disk unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Pending,
    Complete,
    Other(String),
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Complete => "complete",
            JobStatus::Other(s) => s,
        }
    }
}

impl From<String> for JobStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => JobStatus::Pending,
            "complete" => JobStatus::Complete,
            _ => JobStatus::Other(s),
        }
    }
}

impl From<&str> for JobStatus {
    fn from(s: &str) -> Self {
        JobStatus::from(s.to_string())
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub contact_name: String,
    pub location: String,
    pub contact_info: String,
    pub job_description: String,
    pub assigned_to: String,
    pub status: JobStatus,
}

/// Fields a manager supplies when assigning a job.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub contact_name: String,
    pub location: String,
    pub contact_info: String,
    pub job_description: String,
}

/// Canonical views over the job collection.
#[derive(Debug, Clone, Copy)]
pub enum JobFilter<'a> {
    All,
    AssignedPending(&'a str),
    AssignedComplete(&'a str),
    AssignedNotComplete(&'a str),
    Complete,
    NotComplete,
}

impl JobFilter<'_> {
    pub fn matches(&self, job: &Job) -> bool {
        match *self {
            JobFilter::All => true,
            JobFilter::AssignedPending(who) => job.assigned_to == who && job.status == JobStatus::Pending,
            JobFilter::AssignedComplete(who) => job.assigned_to == who && job.status == JobStatus::Complete,
            JobFilter::AssignedNotComplete(who) => job.assigned_to == who && job.status != JobStatus::Complete,
            JobFilter::Complete => job.status == JobStatus::Complete,
            JobFilter::NotComplete => job.status != JobStatus::Complete,
        }
    }
}
