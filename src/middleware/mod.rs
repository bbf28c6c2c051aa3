mod auth;

pub use auth::{load_identity, require_auth, require_role, Identity, USER_SESSION_KEY};
