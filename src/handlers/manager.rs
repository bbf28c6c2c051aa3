use axum::{
    extract::{Extension, Form, State},
    response::{Html, IntoResponse, Response, Redirect},
};
use crate::errors::AppResult;
use crate::middleware::Identity;
use crate::models::{DeleteJobForm, JobFilter, NewJob};
use crate::services::JobStore;
use crate::views::{self, Views};

pub async fn serve_manager_dashboard(
    State(jobs): State<JobStore>,
    State(views): State<Views>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Html<String>> {
    let user = identity.user()?;
    let all = jobs.list_all().await;
    let complete = all.iter().filter(|job| JobFilter::Complete.matches(job)).count();

    let total = all.len().to_string();
    let complete_count = complete.to_string();
    let open_count = (all.len() - complete).to_string();

    views
        .page(
            user,
            "Manager Dashboard",
            "manager_dashboard",
            &[
                ("total", total.as_str()),
                ("complete", complete_count.as_str()),
                ("open", open_count.as_str()),
            ],
        )
        .await
}

pub async fn serve_assign_job_page(
    State(views): State<Views>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Html<String>> {
    views.page(identity.user()?, "Assign Job", "assign_job", &[]).await
}

pub async fn serve_jobs_assigned(
    State(jobs): State<JobStore>,
    State(views): State<Views>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Html<String>> {
    render_job_list(&jobs, &views, &identity, "Jobs Assigned", JobFilter::All).await
}

pub async fn serve_jobs_done(
    State(jobs): State<JobStore>,
    State(views): State<Views>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Html<String>> {
    render_job_list(&jobs, &views, &identity, "Jobs Done", JobFilter::Complete).await
}

pub async fn serve_jobs_pending(
    State(jobs): State<JobStore>,
    State(views): State<Views>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Html<String>> {
    render_job_list(&jobs, &views, &identity, "Jobs Pending", JobFilter::NotComplete).await
}

async fn render_job_list(
    jobs: &JobStore,
    views: &Views,
    identity: &Identity,
    title: &str,
    filter: JobFilter<'_>,
) -> AppResult<Html<String>> {
    let user = identity.user()?;
    let rows = views::manager_job_rows(&jobs.filter_with_positions(filter).await);

    views
        .page(
            user,
            title,
            "manager_jobs",
            &[("heading", title), ("rows", rows.as_str())],
        )
        .await
}

pub async fn assign_job(
    State(jobs): State<JobStore>,
    Form(new_job): Form<NewJob>,
) -> AppResult<Response> {
    tracing::debug!("Assigning job for contact {}", new_job.contact_name);

    jobs.create(new_job).await?;
    Ok(Redirect::to("/manager/jobs-assigned").into_response())
}

/// Delete by `id` when the form carries one, otherwise by positional `index`.
/// Unknown ids and unusable indexes fall through to the redirect.
pub async fn delete_job(
    State(jobs): State<JobStore>,
    Form(form): Form<DeleteJobForm>,
) -> AppResult<Response> {
    let id = form.id.as_deref().map(str::trim).filter(|id| !id.is_empty());

    if let Some(id) = id {
        jobs.delete_by_id(id).await?;
    } else if let Some(index) = form.index.as_deref().and_then(|i| i.trim().parse::<usize>().ok()) {
        jobs.delete(index).await?;
    } else {
        tracing::debug!("Delete request without a usable id or index: {:?}", form);
    }

    Ok(Redirect::to("/manager/jobs-assigned").into_response())
}
