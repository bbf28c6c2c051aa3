use axum::{
    extract::{Extension, Form, State},
    response::{Html, IntoResponse, Response, Redirect},
};
use crate::errors::AppResult;
use crate::middleware::Identity;
use crate::models::{JobFilter, JobStatus, UpdateStatusForm};
use crate::services::JobStore;
use crate::views::{self, Views};

pub async fn serve_delivery_dashboard(
    State(jobs): State<JobStore>,
    State(views): State<Views>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Html<String>> {
    let user = identity.user()?;
    let my_jobs = jobs.filter(JobFilter::AssignedNotComplete(&user.username)).await;
    render(&views, &identity, "My Jobs", &views::worker_job_rows(&my_jobs)).await
}

pub async fn serve_delivery_jobs_done(
    State(jobs): State<JobStore>,
    State(views): State<Views>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Html<String>> {
    let user = identity.user()?;
    let my_jobs = jobs.filter(JobFilter::AssignedComplete(&user.username)).await;
    render(&views, &identity, "Jobs Done", &views::worker_job_rows(&my_jobs)).await
}

pub async fn serve_delivery_jobs_pending(
    State(jobs): State<JobStore>,
    State(views): State<Views>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Html<String>> {
    let user = identity.user()?;
    let my_jobs = jobs.filter(JobFilter::AssignedPending(&user.username)).await;
    render(&views, &identity, "Jobs Pending", &views::worker_job_rows(&my_jobs)).await
}

async fn render(views: &Views, identity: &Identity, title: &str, rows: &str) -> AppResult<Html<String>> {
    views
        .page(identity.user()?, title, "delivery_jobs", &[("heading", title), ("rows", rows)])
        .await
}

pub async fn update_job_status(
    State(jobs): State<JobStore>,
    Form(form): Form<UpdateStatusForm>,
) -> AppResult<Response> {
    let status = JobStatus::from(form.status);
    let target = if status == JobStatus::Complete {
        "/delivery-guy/jobs-done"
    } else {
        "/delivery-guy"
    };

    jobs.update_status(&form.id, status).await?;
    Ok(Redirect::to(target).into_response())
}
