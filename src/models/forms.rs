use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

// Rendered pages post `id`; `index` is the positional fallback
#[derive(Debug, Deserialize, Default)]
pub struct DeleteJobForm {
    pub id: Option<String>,
    pub index: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusForm {
    pub id: String,
    pub status: String,
}
