use gloo::net::http::{Request, RequestBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::{SessionStore, SessionUser};

const API_BASE: &str = "/api/v1";

/// Selectable story types for the create form.
pub const STORY_TYPES: &[&str] = &["enhancement", "bugfix", "development", "QA"];

/// Selectable complexity levels for the create form.
pub const COMPLEXITY_LEVELS: &[&str] = &["low", "mid", "high"];

/// The two verdicts the review endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Accepted,
    Rejected,
}

impl ReviewDecision {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewDecision::Accepted => "accepted",
            ReviewDecision::Rejected => "rejected",
        }
    }
}

/// A story record as the server returns it. The status set is server-owned
/// and open (pending, accepted, rejected, ...), so it stays a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: u64,
    pub summary: String,
    pub description: String,
    pub estimated_hours: f64,
    pub cost: f64,
    #[serde(rename = "type")]
    pub story_type: String,
    pub complexity: String,
    pub status: String,
}

/// The create-form payload: everything on a story except the server-owned
/// id and status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryDraft {
    pub summary: String,
    pub description: String,
    pub estimated_hours: f64,
    pub cost: f64,
    #[serde(rename = "type")]
    pub story_type: String,
    pub complexity: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest {
    email: String,
    password: String,
    is_admin: bool,
}

/// Errors surfaced by the API boundary. Pages collapse all of these to a
/// generic message; `SessionRejected` additionally means the session has
/// already been cleared and the browser sent back to the login route.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("session rejected with status {0}")]
    SessionRejected(u16),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Statuses the server uses to invalidate the current session.
fn is_session_rejection(status: u16) -> bool {
    status == 401 || status == 503
}

/// Full page load back to the login route, discarding all view state.
/// Browser only; a no-op in host tests.
fn force_login_redirect() {
    #[cfg(target_arch = "wasm32")]
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href("/");
    }
}

/// Map a response status to the caller-visible outcome. A 401/503 clears
/// the session and redirects to login before the error is surfaced, so the
/// caller's own failure handler still fires afterwards.
fn check_status(store: &SessionStore, status: u16, expected: u16) -> Result<(), ApiError> {
    if status == expected {
        return Ok(());
    }
    if is_session_rejection(status) {
        store.clear();
        force_login_redirect();
        return Err(ApiError::SessionRejected(status));
    }
    Err(ApiError::Status(status))
}

/// Authorization header value for an outgoing request: the session token
/// when one exists, nothing otherwise.
fn auth_header(store: &SessionStore) -> Option<String> {
    store.token()
}

/// Attach the persisted session token, when present, to an outgoing
/// request. A missing token is not an error; the request goes out
/// unauthenticated.
fn with_auth(store: &SessionStore, request: RequestBuilder) -> RequestBuilder {
    match auth_header(store) {
        Some(token) => request.header("Authorization", &token),
        None => request,
    }
}

fn story_url(id: u64) -> String {
    format!("{API_BASE}/stories/{id}")
}

fn review_url(id: u64, decision: ReviewDecision) -> String {
    format!("{API_BASE}/stories/{id}/{}", decision.as_str())
}

/// POST /signin. The returned user is the caller's to persist.
pub async fn sign_in(
    store: &SessionStore,
    email: &str,
    password: &str,
    is_admin: bool,
) -> Result<SessionUser, ApiError> {
    let body = SignInRequest {
        email: email.to_string(),
        password: password.to_string(),
        is_admin,
    };
    let response = with_auth(store, Request::post(&format!("{API_BASE}/signin")))
        .json(&body)
        .map_err(|err| ApiError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    check_status(store, response.status(), 200)?;
    response
        .json()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

/// POST /stories. The server answers 201 for a stored draft.
pub async fn create_story(store: &SessionStore, draft: &StoryDraft) -> Result<(), ApiError> {
    let response = with_auth(store, Request::post(&format!("{API_BASE}/stories")))
        .json(draft)
        .map_err(|err| ApiError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    check_status(store, response.status(), 201)
}

/// GET /stories.
pub async fn list_stories(store: &SessionStore) -> Result<Vec<Story>, ApiError> {
    let response = with_auth(store, Request::get(&format!("{API_BASE}/stories")))
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    check_status(store, response.status(), 200)?;
    response
        .json()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

/// GET /stories/:id.
pub async fn story_by_id(store: &SessionStore, id: u64) -> Result<Story, ApiError> {
    let response = with_auth(store, Request::get(&story_url(id)))
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    check_status(store, response.status(), 200)?;
    response
        .json()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

/// PUT /stories/:id/:decision with an empty body.
pub async fn review_story(
    store: &SessionStore,
    id: u64,
    decision: ReviewDecision,
) -> Result<(), ApiError> {
    let response = with_auth(store, Request::put(&review_url(id, decision)))
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    check_status(store, response.status(), 200)
}
