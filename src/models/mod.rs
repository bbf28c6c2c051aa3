mod user;
mod forms;
mod job;
mod activity;

pub use user::{User, Role};
pub use forms::{LoginForm, DeleteJobForm, UpdateStatusForm};
pub use job::{Job, JobStatus, NewJob, JobFilter};
pub use activity::{LoginLogEntry, LoginAction};
