use axum::{
    extract::{Extension, Form, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use crate::errors::{AppError, AppResult};
use crate::middleware::{Identity, USER_SESSION_KEY};
use crate::models::LoginForm;
use crate::services::{ActivityLog, UserDirectory};
use crate::views::Views;

#[derive(Debug, Deserialize)]
pub struct LoginPageQuery {
    pub error: Option<String>,
}

pub async fn serve_login_page(
    State(views): State<Views>,
    Query(query): Query<LoginPageQuery>,
) -> AppResult<Html<String>> {
    views.login_page(query.error.as_deref()).await
}

pub async fn handle_login(
    State(users): State<std::sync::Arc<UserDirectory>>,
    State(activity): State<ActivityLog>,
    State(views): State<Views>,
    session: Session,
    Form(login_form): Form<LoginForm>,
) -> AppResult<Response> {
    tracing::info!("Login attempt for user: {}", login_form.username);

    let Some(user) = users.find_user(&login_form.username, &login_form.password) else {
        tracing::warn!("Invalid credentials for user: {}", login_form.username);
        let page = views.login_page(Some("Invalid username or password")).await?;
        return Ok(page.into_response());
    };

    session
        .insert(USER_SESSION_KEY, &user)
        .await
        .map_err(|e| AppError::Session(e.to_string()))?;
    activity.record_login(&user.username).await;

    tracing::info!("User {} logged in as {}", user.username, user.role);
    Ok(Redirect::to(user.home_path()).into_response())
}

pub async fn handle_logout(
    State(activity): State<ActivityLog>,
    Extension(identity): Extension<Identity>,
    session: Session,
) -> Response {
    if let Some(user) = &identity.0 {
        activity.record_logout(&user.username).await;
    }

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to destroy session: {}", e);
        return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to logout").into_response();
    }

    Redirect::to("/").into_response()
}
