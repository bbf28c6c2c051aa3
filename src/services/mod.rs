mod activity_log;
mod job_store;
mod persistence;
mod user_directory;

pub use activity_log::ActivityLog;
pub use job_store::JobStore;
pub use persistence::{InMemoryPersistence, JobPersistence, JsonFilePersistence};
pub use user_directory::UserDirectory;
