use axum::{
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    extract::{Request, State},
    body::Body,
};
use tower_sessions::Session;
use crate::errors::{AppError, AppResult};
use crate::models::{Role, User};

pub const USER_SESSION_KEY: &str = "user_session";

/// The authenticated user for the current request, if any.
///
/// Inserted into request extensions by [`load_identity`]; guards and handlers
/// read it from there instead of touching the session.
#[derive(Debug, Clone, Default)]
pub struct Identity(pub Option<User>);

impl Identity {
    pub fn user(&self) -> AppResult<&User> {
        self.0
            .as_ref()
            .ok_or_else(|| AppError::Auth("Not authenticated".into()))
    }
}

pub async fn load_identity(
    session: Session,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let user = match session.get::<User>(USER_SESSION_KEY).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("Failed to read session: {}", e);
            None
        }
    };

    req.extensions_mut().insert(Identity(user));
    next.run(req).await
}

pub async fn require_auth(
    req: Request<Body>,
    next: Next,
) -> Response {
    let authenticated = matches!(req.extensions().get::<Identity>(), Some(Identity(Some(_))));

    if authenticated {
        next.run(req).await
    } else {
        tracing::debug!("Unauthenticated request to {}, redirecting", req.uri().path());
        Redirect::to("/").into_response()
    }
}

// A request with no identity at all fails here too
pub async fn require_role(
    State(role): State<Role>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let checked = req
        .extensions()
        .get::<Identity>()
        .and_then(|identity| identity.0.as_ref())
        .map(|user| (user.username.clone(), user.role == role));

    match checked {
        Some((_, true)) => next.run(req).await,
        Some((username, false)) => {
            tracing::warn!("User {} denied access to {} (requires {})", username, req.uri().path(), role);
            AppError::Forbidden.into_response()
        }
        None => {
            tracing::warn!("Anonymous request denied access to {}", req.uri().path());
            AppError::Forbidden.into_response()
        }
    }
}
