//! Page rendering by placeholder substitution into HTML files under the
//! configured templates directory.

use axum::response::Html;
use std::path::PathBuf;
use crate::errors::{AppError, AppResult};
use crate::models::{Job, Role, User};

#[derive(Clone)]
pub struct Views {
    dir: PathBuf,
}

impl Views {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn render(&self, name: &str, vars: &[(&str, &str)]) -> AppResult<String> {
        let path = self.dir.join(format!("{}.html", name));
        let template = tokio::fs::read_to_string(&path).await.map_err(|e| {
            tracing::error!("Failed to read template {}: {}", path.display(), e);
            AppError::File(e)
        })?;
        Ok(fill(&template, vars))
    }

    pub async fn login_page(&self, message: Option<&str>) -> AppResult<Html<String>> {
        let message = match message {
            Some(msg) => format!(r#"<p class="error">{}</p>"#, escape(msg)),
            None => String::new(),
        };
        Ok(Html(self.render("login", &[("message", message.as_str())]).await?))
    }

    /// Render `content` (a template name) inside the shared layout for `user`.
    pub async fn page(
        &self,
        user: &User,
        title: &str,
        content: &str,
        vars: &[(&str, &str)],
    ) -> AppResult<Html<String>> {
        let body = self.render(content, vars).await?;
        let username = escape(&user.username);
        let html = self
            .render(
                "layout",
                &[
                    ("title", title),
                    ("username", username.as_str()),
                    ("nav", nav_for(user.role)),
                    ("content", body.as_str()),
                ],
            )
            .await?;
        Ok(Html(html))
    }
}

fn nav_for(role: Role) -> &'static str {
    match role {
        Role::Manager => concat!(
            r#"<a href="/manager">Dashboard</a>"#,
            r#"<a href="/manager/assign-job">Assign Job</a>"#,
            r#"<a href="/manager/jobs-assigned">Jobs Assigned</a>"#,
            r#"<a href="/manager/jobs-pending">Jobs Pending</a>"#,
            r#"<a href="/manager/jobs-done">Jobs Done</a>"#,
        ),
        Role::DeliveryGuy => concat!(
            r#"<a href="/delivery-guy">My Jobs</a>"#,
            r#"<a href="/delivery-guy/jobs-pending">Pending</a>"#,
            r#"<a href="/delivery-guy/jobs-done">Done</a>"#,
        ),
    }
}

/// Table rows for manager views. Each row carries a delete form with the
/// job id and its position in the full collection.
pub fn manager_job_rows(jobs: &[(usize, Job)]) -> String {
    if jobs.is_empty() {
        return r#"<tr><td colspan="7">No jobs</td></tr>"#.to_string();
    }

    jobs.iter()
        .map(|(index, job)| {
            format!(
                r#"<tr>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
                <td class="action-cell">
                    <form method="post" action="/delete-job">
                        <input type="hidden" name="id" value="{}">
                        <input type="hidden" name="index" value="{}">
                        <button type="submit" class="delete-btn">Delete</button>
                    </form>
                </td>
            </tr>"#,
                escape(&job.contact_name),
                escape(&job.location),
                escape(&job.contact_info),
                escape(&job.job_description),
                escape(&job.assigned_to),
                escape(job.status.as_str()),
                escape(&job.id),
                index,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Table rows for the delivery worker, with a status update form per job.
pub fn worker_job_rows(jobs: &[Job]) -> String {
    if jobs.is_empty() {
        return r#"<tr><td colspan="6">No jobs</td></tr>"#.to_string();
    }

    jobs.iter()
        .map(|job| {
            format!(
                r#"<tr>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
                <td class="action-cell">
                    <form method="post" action="/update-job-status">
                        <input type="hidden" name="id" value="{}">
                        <select name="status">
                            <option value="pending">pending</option>
                            <option value="complete">complete</option>
                        </select>
                        <button type="submit">Update</button>
                    </form>
                </td>
            </tr>"#,
                escape(&job.contact_name),
                escape(&job.location),
                escape(&job.contact_info),
                escape(&job.job_description),
                escape(job.status.as_str()),
                escape(&job.id),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// Single pass, so substituted values are never scanned for placeholders again
fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = after[..end].trim();
        match vars.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(c),
        }
    }
    out
}
