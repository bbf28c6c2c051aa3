mod auth;
mod manager;
mod delivery;

pub use auth::{serve_login_page, handle_login, handle_logout};
pub use manager::{
    serve_manager_dashboard, serve_assign_job_page, serve_jobs_assigned, serve_jobs_done,
    serve_jobs_pending, assign_job, delete_job,
};
pub use delivery::{
    serve_delivery_dashboard, serve_delivery_jobs_done, serve_delivery_jobs_pending,
    update_job_status,
};
