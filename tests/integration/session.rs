//! Session lifecycle against the mock platform.

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use bizobj_api::LoginOptions;

use crate::common::{mock_platform, session_for};

#[tokio::test]
async fn test_login_then_authenticated_call_then_logout() {
    let server = mock_platform().await;

    Mock::given(method("GET"))
        .and(path("/api/json/app"))
        .and(query_param("action", "getinfo"))
        .and(header(
            bizobj_api::client::BEARER_HEADER,
            "Bearer tok-int",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "type": "appinfo",
            "response": {"title": "Demo", "version": "6.3"}
        })))
        .mount(&server)
        .await;

    let session = session_for(&server);

    let login = session.login(LoginOptions::default()).await.unwrap();
    assert_eq!(login.login.as_deref(), Some("designer"));
    assert_eq!(session.session_id().as_deref(), Some("S-INT-1"));

    // The token from login authenticates subsequent calls.
    let info = session.get_app_info().await.unwrap();
    assert_eq!(info["title"], "Demo");

    session.logout().await.unwrap();
    assert!(session.auth_token().is_none());
    assert!(session.grant().is_none());
}

#[tokio::test]
async fn test_login_failure_surfaces_server_message() {
    // A bare server: the stock login mock must not shadow the failure.
    crate::common::init_tracing();
    let server = wiremock::MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/json/app"))
        .and(query_param("action", "session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "type": "error",
            "response": {"message": "Invalid credentials", "status": 401}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let err = session
        .login(LoginOptions {
            username: Some("designer".to_string()),
            password: Some("wrong".to_string()),
        })
        .await
        .unwrap_err();

    assert!(err.is_api_error());
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.message(), Some("Invalid credentials"));
    assert!(session.auth_token().is_none());
}

#[tokio::test]
async fn test_health_without_login() {
    let server = mock_platform().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "platform": {"status": "OK"}
        })))
        .mount(&server)
        .await;

    let session = session_for(&server);
    let health = session.get_health(false).await.unwrap();
    assert_eq!(health["platform"]["status"], "OK");
}
