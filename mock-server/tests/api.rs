use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_config, MockConfig, StoredHome, DEFAULT_ACCESS_CODE, DEFAULT_USER_UUID};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn homes_uri() -> String {
    format!("/api/u/{DEFAULT_USER_UUID}/homes")
}

fn home_uri(uuid: &str) -> String {
    format!("/api/u/{DEFAULT_USER_UUID}/homes/{uuid}")
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::ACCEPT, "application/json")
        .header(http::header::AUTHORIZATION, format!("Bearer {DEFAULT_ACCESS_CODE}"))
        .body(body.to_string())
        .unwrap()
}

const VALID_HOME: &str = r#"{
    "name": "Oak House",
    "description": "cozy",
    "domain_name": "d1234.cloudfront.net",
    "town": "cooker-cove",
    "content_version": 1
}"#;

// --- headers and auth ---

#[tokio::test]
async fn missing_content_type_returns_415() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri(home_uri("x"))
                .header(http::header::ACCEPT, "application/json")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["err"], "expected Content_type header to be application/json");
}

#[tokio::test]
async fn wrong_accept_returns_406() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri(home_uri("x"))
                .header(http::header::CONTENT_TYPE, "application/json")
                .header(http::header::ACCEPT, "text/html")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_ACCEPTABLE);
}

#[tokio::test]
async fn missing_bearer_returns_a1000() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri(home_uri("x"))
                .header(http::header::CONTENT_TYPE, "application/json")
                .header(http::header::ACCEPT, "application/json")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["err"].as_str().unwrap().starts_with("a1000 "));
}

#[tokio::test]
async fn wrong_token_returns_a1001() {
    let resp = app_with_config(MockConfig {
        access_code: "other".to_string(),
        user_uuid: DEFAULT_USER_UUID.to_string(),
    })
    .oneshot(json_request("GET", &home_uri("x"), ""))
    .await
    .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["err"].as_str().unwrap().starts_with("a1001 "));
}

#[tokio::test]
async fn wrong_user_returns_a1003() {
    let resp = app()
        .oneshot(json_request(
            "GET",
            "/api/u/00000000-0000-0000-0000-000000000000/homes/x",
            "",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["err"].as_str().unwrap().starts_with("a1003 "));
}

// --- create ---

#[tokio::test]
async fn create_home_returns_uuid() {
    let resp = app()
        .oneshot(json_request("POST", &homes_uri(), VALID_HOME))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert!(uuid::Uuid::parse_str(body["uuid"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn create_home_accepts_trailing_slash() {
    let resp = app()
        .oneshot(json_request("POST", &format!("{}/", homes_uri()), VALID_HOME))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_home_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", &homes_uri(), "{not json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(&body_bytes(resp).await[..], b"Malformed JSON");
}

#[tokio::test]
async fn create_home_invalid_fields_returns_messages() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            &homes_uri(),
            r#"{"name":"Oak","description":"cozy","domain_name":"oak.example.com","town":"riverside","content_version":1}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = body_json(resp).await;
    let messages: serde_json::Value = serde_json::from_str(body["err"].as_str().unwrap()).unwrap();
    assert_eq!(messages["town"][0], "is not included in the list");
    assert_eq!(messages["domain_name"][0], "domain must be from .cloudfront.net");
    assert!(messages.get("name").is_none());
}

// --- read / update / delete on unknown ---

#[tokio::test]
async fn read_unknown_home_returns_404() {
    let resp = app()
        .oneshot(json_request("GET", &home_uri("abc-123"), ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["err"], "failed to find home with provided uuid and bearer token");
}

#[tokio::test]
async fn update_unknown_home_returns_404() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            &home_uri("abc-123"),
            r#"{"name":"n","description":"d","content_version":2}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_home_returns_404() {
    let resp = app()
        .oneshot(json_request("DELETE", &home_uri("abc-123"), ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", &homes_uri(), VALID_HOME))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let created: serde_json::Value = body_json(resp).await;
    let uuid = created["uuid"].as_str().unwrap().to_string();

    // read
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("GET", &home_uri(&uuid), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: StoredHome = body_json(resp).await;
    assert_eq!(fetched.uuid, uuid);
    assert_eq!(fetched.name, "Oak House");
    assert_eq!(fetched.town, "cooker-cove");

    // update with a bad version is rejected
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &home_uri(&uuid),
            r#"{"name":"Oak House","description":"cozier","content_version":"two"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // update
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &home_uri(&uuid),
            r#"{"name":"Oak House","description":"cozier","content_version":2}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: serde_json::Value = body_json(resp).await;
    assert_eq!(updated["uuid"], uuid.as_str());

    // read reflects the update, town and domain unchanged
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("GET", &home_uri(&uuid), ""))
        .await
        .unwrap();
    let fetched: StoredHome = body_json(resp).await;
    assert_eq!(fetched.description, "cozier");
    assert_eq!(fetched.content_version, 2);
    assert_eq!(fetched.domain_name, "d1234.cloudfront.net");
    assert_eq!(fetched.town, "cooker-cove");

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("DELETE", &home_uri(&uuid), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted: serde_json::Value = body_json(resp).await;
    assert_eq!(deleted["uuid"], uuid.as_str());

    // read after delete is a 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("GET", &home_uri(&uuid), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
