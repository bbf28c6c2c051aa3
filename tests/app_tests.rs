use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use bizdeliver::config::Config;
use bizdeliver::models::{Job, JobStatus, LoginAction};
use bizdeliver::services::{InMemoryPersistence, JobStore};
use bizdeliver::{build_router, AppState};

struct TestApp {
    router: Router,
    state: AppState,
    jobs_file: PathBuf,
    _dir: TempDir,
}

fn test_config(jobs_file: PathBuf) -> Config {
    let mut config = Config::default();
    config.storage.jobs_file = jobs_file;
    config.server.templates_dir = PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"));
    config.server.static_dir = PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static"));
    config
}

async fn setup() -> TestApp {
    let dir = TempDir::new().unwrap();
    let jobs_file = dir.path().join("data/jobs.json");
    let state = AppState::from_config(test_config(jobs_file.clone())).await.unwrap();

    TestApp {
        router: build_router(state.clone()),
        state,
        jobs_file,
        _dir: dir,
    }
}

impl TestApp {
    async fn send(&self, req: Request<Body>) -> Response {
        self.router.clone().oneshot(req).await.unwrap()
    }

    async fn get(&self, path: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn post_form(&self, path: &str, body: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap()).await
    }

    /// Log in and return the session cookie pair.
    async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post_form("/login", &format!("username={}&password={}", username, password), None)
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        session_cookie(&response)
    }
}

fn session_cookie(response: &Response) -> String {
    let raw = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .unwrap();
    raw.split(';').next().unwrap().to_string()
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

const ALICE_JOB: &str =
    "contactName=Alice&location=5th+Ave&contactInfo=555-1234&jobDescription=deliver+box";

#[tokio::test]
async fn test_manager_and_worker_full_job_lifecycle() {
    let app = setup().await;

    // Manager logs in and assigns a job
    let response = app
        .post_form("/login", "username=manager&password=manager123", None)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/manager");
    let manager = session_cookie(&response);

    let response = app.get("/manager", Some(&manager)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.post_form("/assign-job", ALICE_JOB, Some(&manager)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/manager/jobs-assigned");

    let jobs = app.state.jobs.list_all().await;
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].contact_name, "Alice");
    assert_eq!(jobs[0].location, "5th Ave");
    assert_eq!(jobs[0].status, JobStatus::Pending);
    assert_eq!(jobs[0].assigned_to, "deliveryguy");
    let job_id = jobs[0].id.clone();

    // Worker sees it as pending and completes it
    let response = app
        .post_form("/login", "username=deliveryguy&password=delivery123", None)
        .await;
    assert_eq!(location(&response), "/delivery-guy");
    let worker = session_cookie(&response);

    let pending = body_text(app.get("/delivery-guy/jobs-pending", Some(&worker)).await).await;
    assert!(pending.contains("Alice"));

    let response = app
        .post_form("/update-job-status", &format!("id={}&status=complete", job_id), Some(&worker))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/delivery-guy/jobs-done");

    let done = body_text(app.get("/delivery-guy/jobs-done", Some(&worker)).await).await;
    assert!(done.contains("Alice"));
    let pending = body_text(app.get("/delivery-guy/jobs-pending", Some(&worker)).await).await;
    assert!(!pending.contains("Alice"));
    let manager_done = body_text(app.get("/manager/jobs-done", Some(&manager)).await).await;
    assert!(manager_done.contains("Alice"));

    // Manager deletes it by position
    let response = app.post_form("/delete-job", "index=0", Some(&manager)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/manager/jobs-assigned");

    assert!(app.state.jobs.list_all().await.is_empty());
    let on_disk: Vec<Job> =
        serde_json::from_str(&std::fs::read_to_string(&app.jobs_file).unwrap()).unwrap();
    assert!(on_disk.is_empty());
}

#[tokio::test]
async fn test_login_page_is_public() {
    let app = setup().await;

    for path in ["/", "/login"] {
        let response = app.get(path, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("action=\"/login\""));
    }
}

#[tokio::test]
async fn test_invalid_credentials_rerender_login_with_message() {
    let app = setup().await;

    let response = app
        .post_form("/login", "username=manager&password=wrong", None)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::LOCATION).is_none());
    assert!(body_text(response).await.contains("Invalid username or password"));
    assert!(app.state.activity.entries().await.is_empty());
}

#[tokio::test]
async fn test_unauthenticated_requests_redirect_to_login() {
    let app = setup().await;

    for path in ["/manager", "/manager/jobs-assigned", "/delivery-guy"] {
        let response = app.get(path, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", path);
        assert_eq!(location(&response), "/");
    }

    let response = app.post_form("/assign-job", ALICE_JOB, None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(app.state.jobs.list_all().await.is_empty());
}

#[tokio::test]
async fn test_manager_views_split_by_status_and_keep_positions() {
    let app = setup().await;
    let manager = app.login("manager", "manager123").await;
    let worker = app.login("deliveryguy", "delivery123").await;
    app.post_form("/assign-job", ALICE_JOB, Some(&manager)).await;
    app.post_form(
        "/assign-job",
        "contactName=Bob&location=Main+St&contactInfo=555-0000&jobDescription=parcel",
        Some(&manager),
    )
    .await;
    let bob_id = app.state.jobs.list_all().await[1].id.clone();
    app.post_form("/update-job-status", &format!("id={}&status=complete", bob_id), Some(&worker))
        .await;

    let assigned = body_text(app.get("/manager/jobs-assigned", Some(&manager)).await).await;
    assert!(assigned.contains("Alice"));
    assert!(assigned.contains("Bob"));

    let pending = body_text(app.get("/manager/jobs-pending", Some(&manager)).await).await;
    assert!(pending.contains("Alice"));
    assert!(!pending.contains("Bob"));
    assert!(pending.contains(r#"name="index" value="0""#));

    let done = body_text(app.get("/manager/jobs-done", Some(&manager)).await).await;
    assert!(done.contains("Bob"));
    assert!(!done.contains("Alice"));
    assert!(done.contains(r#"name="index" value="1""#));
    assert!(!done.contains(r#"name="index" value="0""#));

    // The position shown on the filtered page removes that same job
    app.post_form("/delete-job", "index=1", Some(&manager)).await;
    let remaining = app.state.jobs.list_all().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].contact_name, "Alice");
}

#[tokio::test]
async fn test_wrong_role_is_forbidden() {
    let app = setup().await;
    let worker = app.login("deliveryguy", "delivery123").await;
    let manager = app.login("manager", "manager123").await;

    let response = app.get("/manager", Some(&worker)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_text(response).await, "Forbidden");

    let response = app.post_form("/assign-job", ALICE_JOB, Some(&worker)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(app.state.jobs.list_all().await.is_empty());

    let response = app.get("/delivery-guy", Some(&manager)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .post_form("/update-job-status", "id=x&status=complete", Some(&manager))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_logout_records_activity_and_ends_session() {
    let app = setup().await;
    let manager = app.login("manager", "manager123").await;

    let response = app.post_form("/logout", "", Some(&manager)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = app.get("/manager", Some(&manager)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let entries = app.state.activity.entries().await;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].username, "manager");
    assert_eq!(entries[0].action, LoginAction::Login);
    assert_eq!(entries[1].action, LoginAction::Logout);
}

#[tokio::test]
async fn test_unusable_delete_requests_are_silent_noops() {
    let app = setup().await;
    let manager = app.login("manager", "manager123").await;
    app.post_form("/assign-job", ALICE_JOB, Some(&manager)).await;
    let before = app.state.jobs.list_all().await;

    for body in ["index=1", "index=-1", "index=abc", "", "id=unknown"] {
        let response = app.post_form("/delete-job", body, Some(&manager)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", body);
        assert_eq!(location(&response), "/manager/jobs-assigned");
    }

    assert_eq!(app.state.jobs.list_all().await, before);
}

#[tokio::test]
async fn test_delete_prefers_id_over_index() {
    let app = setup().await;
    let manager = app.login("manager", "manager123").await;
    app.post_form("/assign-job", ALICE_JOB, Some(&manager)).await;
    app.post_form(
        "/assign-job",
        "contactName=Bob&location=Main+St&contactInfo=555-0000&jobDescription=parcel",
        Some(&manager),
    )
    .await;
    let bob_id = app.state.jobs.list_all().await[1].id.clone();

    app.post_form("/delete-job", &format!("id={}&index=0", bob_id), Some(&manager))
        .await;

    let remaining = app.state.jobs.list_all().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].contact_name, "Alice");
}

#[tokio::test]
async fn test_non_complete_status_redirects_to_worker_dashboard() {
    let app = setup().await;
    let manager = app.login("manager", "manager123").await;
    let worker = app.login("deliveryguy", "delivery123").await;
    app.post_form("/assign-job", ALICE_JOB, Some(&manager)).await;
    let job_id = app.state.jobs.list_all().await[0].id.clone();

    let response = app
        .post_form("/update-job-status", &format!("id={}&status=on-hold", job_id), Some(&worker))
        .await;
    assert_eq!(location(&response), "/delivery-guy");
    assert_eq!(
        app.state.jobs.list_all().await[0].status,
        JobStatus::Other("on-hold".to_string())
    );

    // Unknown ids change nothing but still redirect
    let response = app
        .post_form("/update-job-status", "id=missing&status=complete", Some(&worker))
        .await;
    assert_eq!(location(&response), "/delivery-guy/jobs-done");
    assert_eq!(app.state.jobs.list_all().await.len(), 1);

    let dashboard = body_text(app.get("/delivery-guy", Some(&worker)).await).await;
    assert!(dashboard.contains("Alice"));
}

#[tokio::test]
async fn test_missing_form_field_is_rejected() {
    let app = setup().await;
    let manager = app.login("manager", "manager123").await;

    let response = app
        .post_form("/assign-job", "contactName=Alice&location=5th+Ave", Some(&manager))
        .await;

    assert!(response.status().is_client_error());
    assert!(app.state.jobs.list_all().await.is_empty());
}

#[tokio::test]
async fn test_failed_write_returns_server_error() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path().join("jobs.json"));
    let backend = Arc::new(InMemoryPersistence::new());
    let jobs = JobStore::load(backend.clone(), &config.jobs.default_assignee)
        .await
        .unwrap();
    let state = AppState::new(config, jobs);
    let app = TestApp {
        router: build_router(state.clone()),
        state,
        jobs_file: dir.path().join("jobs.json"),
        _dir: dir,
    };
    let manager = app.login("manager", "manager123").await;

    backend.set_fail_writes(true);
    let response = app.post_form("/assign-job", ALICE_JOB, Some(&manager)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "Server error");
    // The append is not rolled back
    assert_eq!(app.state.jobs.list_all().await.len(), 1);
    assert!(backend.snapshot().await.is_empty());
    assert!(!app.jobs_file.exists());
}

#[tokio::test]
async fn test_existing_jobs_file_is_loaded_at_startup() {
    let dir = TempDir::new().unwrap();
    let jobs_file = dir.path().join("jobs.json");
    std::fs::write(
        &jobs_file,
        r#"[{"id":"abc","contactName":"Carol","location":"Elm St","contactInfo":"555-9999","jobDescription":"flowers","assignedTo":"deliveryguy","status":"pending"}]"#,
    )
    .unwrap();

    let state = AppState::from_config(test_config(jobs_file)).await.unwrap();
    let jobs = state.jobs.list_all().await;

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, "abc");
    assert_eq!(jobs[0].contact_name, "Carol");
}

#[tokio::test]
async fn test_corrupt_jobs_file_fails_startup() {
    let dir = TempDir::new().unwrap();
    let jobs_file = dir.path().join("jobs.json");
    std::fs::write(&jobs_file, "not json").unwrap();

    assert!(AppState::from_config(test_config(jobs_file)).await.is_err());
}

#[tokio::test]
async fn test_static_assets_are_served() {
    let app = setup().await;
    let response = app.get("/static/style.css", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}
