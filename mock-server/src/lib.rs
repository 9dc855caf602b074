//! In-process TerraTowns mock service.
//!
//! Holds a single home at a time, checks `Content-Type`/`Accept`, bearer
//! token and user uuid on every request, and validates payloads the way
//! the hosted service does.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const DEFAULT_ACCESS_CODE: &str = "9b49b3fb-b8e9-483c-b703-97ba88eef8e0";
pub const DEFAULT_USER_UUID: &str = "e328f4ab-b99f-421c-84c9-4ccea042c7d1";

pub const TOWNS: [&str; 6] = [
    "melomaniac-mansion",
    "cooker-cove",
    "the-nomad-pad",
    "gamers-grotto",
    "video-valley",
    "Ripping-Rap-Ridge",
];

const NOT_FOUND: &str = "failed to find home with provided uuid and bearer token";

/// Credentials the mock accepts.
#[derive(Clone, Debug)]
pub struct MockConfig {
    pub access_code: String,
    pub user_uuid: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            access_code: DEFAULT_ACCESS_CODE.to_string(),
            user_uuid: DEFAULT_USER_UUID.to_string(),
        }
    }
}

impl MockConfig {
    /// Reads `ACCESS_CODE` and `USER_UUID`, falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            access_code: std::env::var("ACCESS_CODE").unwrap_or(defaults.access_code),
            user_uuid: std::env::var("USER_UUID").unwrap_or(defaults.user_uuid),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredHome {
    pub uuid: String,
    pub name: String,
    pub town: String,
    pub description: String,
    pub domain_name: String,
    pub content_version: i64,
}

/// Incoming create/update body. Every field is optional so missing values
/// surface as validation messages rather than a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct HomePayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub domain_name: Option<String>,
    pub town: Option<String>,
    pub content_version: Option<serde_json::Value>,
}

pub type Store = Arc<RwLock<Option<StoredHome>>>;

#[derive(Clone)]
pub struct AppState {
    config: Arc<MockConfig>,
    home: Store,
}

pub fn app() -> Router {
    app_with_config(MockConfig::default())
}

pub fn app_with_config(config: MockConfig) -> Router {
    let state = AppState {
        config: Arc::new(config),
        home: Arc::new(RwLock::new(None)),
    };
    Router::new()
        .route("/api/u/{user_uuid}/homes", post(create_home))
        .route("/api/u/{user_uuid}/homes/", post(create_home))
        .route(
            "/api/u/{user_uuid}/homes/{uuid}",
            get(read_home).put(update_home).delete(delete_home),
        )
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_config(listener, MockConfig::default()).await
}

pub async fn run_with_config(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_config(config)).await
}

fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "err": message.into() }))).into_response()
}

fn unauthorized(code: &str) -> Response {
    error(
        StatusCode::UNAUTHORIZED,
        format!("{code} Failed to authenticate, bearer token invalid and/or teacherseat_user_uuid invalid"),
    )
}

fn malformed_json() -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, "Malformed JSON").into_response()
}

fn header_str<'a>(headers: &'a HeaderMap, name: header::HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Header and credential checks shared by every route, in the order the
/// service applies them.
fn authorize(state: &AppState, headers: &HeaderMap, user_uuid: &str) -> Result<(), Response> {
    if header_str(headers, header::CONTENT_TYPE) != Some("application/json") {
        return Err(error(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "expected Content_type header to be application/json",
        ));
    }
    if header_str(headers, header::ACCEPT) != Some("application/json") {
        return Err(error(
            StatusCode::NOT_ACCEPTABLE,
            "expected Accept header to be application/json",
        ));
    }

    let Some(code) = header_str(headers, header::AUTHORIZATION).and_then(|v| v.strip_prefix("Bearer ")) else {
        return Err(unauthorized("a1000"));
    };
    if code != state.config.access_code {
        return Err(unauthorized("a1001"));
    }
    if user_uuid != state.config.user_uuid {
        return Err(unauthorized("a1003"));
    }
    Ok(())
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Attribute name to error messages. Empty when the home is valid.
pub fn validate_home(
    name: Option<&str>,
    description: Option<&str>,
    domain_name: Option<&str>,
    town: Option<&str>,
    content_version: Option<&serde_json::Value>,
) -> BTreeMap<&'static str, Vec<&'static str>> {
    let mut errors: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();

    if is_blank(town) {
        errors.entry("town").or_default().push("can't be blank");
    }
    if !town.is_some_and(|t| TOWNS.contains(&t)) {
        errors.entry("town").or_default().push("is not included in the list");
    }
    if is_blank(name) {
        errors.entry("name").or_default().push("can't be blank");
    }
    if is_blank(description) {
        errors.entry("description").or_default().push("can't be blank");
    }
    if !domain_name.is_some_and(|d| d.ends_with(".cloudfront.net")) {
        errors.entry("domain_name").or_default().push("domain must be from .cloudfront.net");
    }
    match content_version {
        Some(v) if v.is_i64() => {}
        Some(v) if v.is_number() => errors.entry("content_version").or_default().push("must be an integer"),
        _ => errors.entry("content_version").or_default().push("is not a number"),
    }

    errors
}

fn validation_failed(errors: &BTreeMap<&'static str, Vec<&'static str>>) -> Response {
    let messages = serde_json::to_string(errors).unwrap_or_default();
    error(StatusCode::UNPROCESSABLE_ENTITY, messages)
}

async fn create_home(
    State(state): State<AppState>,
    Path(user_uuid): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Response {
    if let Err(rejection) = authorize(&state, &headers, &user_uuid) {
        return rejection;
    }
    tracing::info!("create - POST /api/homes");

    let Ok(payload) = serde_json::from_str::<HomePayload>(&body) else {
        return malformed_json();
    };

    let errors = validate_home(
        payload.name.as_deref(),
        payload.description.as_deref(),
        payload.domain_name.as_deref(),
        payload.town.as_deref(),
        payload.content_version.as_ref(),
    );
    if !errors.is_empty() {
        return validation_failed(&errors);
    }

    let home = StoredHome {
        uuid: Uuid::new_v4().to_string(),
        name: payload.name.unwrap_or_default(),
        town: payload.town.unwrap_or_default(),
        description: payload.description.unwrap_or_default(),
        domain_name: payload.domain_name.unwrap_or_default(),
        content_version: payload.content_version.and_then(|v| v.as_i64()).unwrap_or_default(),
    };
    tracing::info!(uuid = %home.uuid, town = %home.town, "home created");
    let uuid = home.uuid.clone();
    *state.home.write().await = Some(home);

    Json(json!({ "uuid": uuid })).into_response()
}

async fn read_home(
    State(state): State<AppState>,
    Path((user_uuid, uuid)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Err(rejection) = authorize(&state, &headers, &user_uuid) {
        return rejection;
    }
    tracing::info!("read - GET /api/homes/:uuid");

    match state.home.read().await.as_ref() {
        Some(home) if home.uuid == uuid => Json(home.clone()).into_response(),
        _ => error(StatusCode::NOT_FOUND, NOT_FOUND),
    }
}

async fn update_home(
    State(state): State<AppState>,
    Path((user_uuid, uuid)): Path<(String, String)>,
    headers: HeaderMap,
    body: String,
) -> Response {
    if let Err(rejection) = authorize(&state, &headers, &user_uuid) {
        return rejection;
    }
    tracing::info!("update - PUT /api/homes/:uuid");

    let Ok(payload) = serde_json::from_str::<HomePayload>(&body) else {
        return malformed_json();
    };

    let mut slot = state.home.write().await;
    let Some(home) = slot.as_mut().filter(|home| home.uuid == uuid) else {
        return error(StatusCode::NOT_FOUND, NOT_FOUND);
    };

    // Town and domain name are fixed at creation.
    let errors = validate_home(
        payload.name.as_deref(),
        payload.description.as_deref(),
        Some(home.domain_name.as_str()),
        Some(home.town.as_str()),
        payload.content_version.as_ref(),
    );
    if !errors.is_empty() {
        return validation_failed(&errors);
    }

    home.name = payload.name.unwrap_or_default();
    home.description = payload.description.unwrap_or_default();
    home.content_version = payload.content_version.and_then(|v| v.as_i64()).unwrap_or_default();

    Json(json!({ "uuid": uuid })).into_response()
}

async fn delete_home(
    State(state): State<AppState>,
    Path((user_uuid, uuid)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Err(rejection) = authorize(&state, &headers, &user_uuid) {
        return rejection;
    }
    tracing::info!("delete - DELETE /api/homes/:uuid");

    let mut slot = state.home.write().await;
    if !slot.as_ref().is_some_and(|home| home.uuid == uuid) {
        return error(StatusCode::NOT_FOUND, NOT_FOUND);
    }
    *slot = None;

    Json(json!({ "uuid": uuid })).into_response()
}
