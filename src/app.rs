use axum::{
    extract::FromRef,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir};
use tower_sessions::cookie::SameSite;
use tower_sessions::{MemoryStore, SessionManagerLayer};
use crate::{
    config::Config,
    errors::StoreResult,
    handlers,
    middleware,
    models::Role,
    services::{ActivityLog, JobStore, JsonFilePersistence, UserDirectory},
    views::Views,
};

// Shared by every handler
#[derive(FromRef, Clone)]
pub struct AppState {
    pub jobs: JobStore,
    pub users: Arc<UserDirectory>,
    pub activity: ActivityLog,
    pub views: Views,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, jobs: JobStore) -> Self {
        Self {
            jobs,
            users: Arc::new(UserDirectory::new(config.users())),
            activity: ActivityLog::new(),
            views: Views::new(config.server.templates_dir.clone()),
            config: Arc::new(config),
        }
    }

    /// Build state backed by the JSON file named in `config`.
    pub async fn from_config(config: Config) -> StoreResult<Self> {
        let backend = Arc::new(JsonFilePersistence::new(config.storage.jobs_file.clone()));
        let jobs = JobStore::load(backend, &config.jobs.default_assignee).await?;
        Ok(Self::new(config, jobs))
    }
}

pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.session.secure)
        .with_same_site(SameSite::Lax)
        .with_name(config.session.cookie_name.clone());

    // Layers run bottom-up: authentication is checked before role
    let manager_routes = Router::new()
        .route("/manager", get(handlers::serve_manager_dashboard))
        .route("/manager/assign-job", get(handlers::serve_assign_job_page))
        .route("/manager/jobs-assigned", get(handlers::serve_jobs_assigned))
        .route("/manager/jobs-done", get(handlers::serve_jobs_done))
        .route("/manager/jobs-pending", get(handlers::serve_jobs_pending))
        .route("/assign-job", post(handlers::assign_job))
        .route("/delete-job", post(handlers::delete_job))
        .route_layer(from_fn_with_state(Role::Manager, middleware::require_role))
        .route_layer(from_fn(middleware::require_auth));

    let delivery_routes = Router::new()
        .route("/delivery-guy", get(handlers::serve_delivery_dashboard))
        .route("/delivery-guy/jobs-done", get(handlers::serve_delivery_jobs_done))
        .route("/delivery-guy/jobs-pending", get(handlers::serve_delivery_jobs_pending))
        .route("/update-job-status", post(handlers::update_job_status))
        .route_layer(from_fn_with_state(Role::DeliveryGuy, middleware::require_role))
        .route_layer(from_fn(middleware::require_auth));

    let session_routes = Router::new()
        .route("/logout", post(handlers::handle_logout))
        .route_layer(from_fn(middleware::require_auth));

    Router::new()
        .route("/", get(handlers::serve_login_page))
        .route("/login", get(handlers::serve_login_page).post(handlers::handle_login))
        .merge(session_routes)
        .merge(manager_routes)
        .merge(delivery_routes)
        .nest_service("/static", ServeDir::new(&config.server.static_dir))
        .layer(from_fn(middleware::load_identity))
        .layer(session_layer)
        .layer(RequestBodyLimitLayer::new(config.limits.max_body_size))
        .with_state(state)
}
