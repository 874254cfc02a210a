//! Shared helpers: tracing setup and a mock platform instance.

use std::sync::Once;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bizobj_api::{Session, SessionConfig};

static TRACING: Once = Once::new();

pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Start a mock platform that accepts login and logout.
pub async fn mock_platform() -> MockServer {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/json/app"))
        .and(query_param("action", "session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "type": "session",
            "response": {
                "id": "S-INT-1",
                "login": "designer",
                "authtoken": "tok-int",
                "firstname": "Dee",
                "lastname": "Signer"
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/json/app"))
        .and(query_param("action", "logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "type": "logout",
            "response": {"result": "OK"}
        })))
        .mount(&server)
        .await;

    server
}

/// A session configured against the mock platform, not yet logged in.
pub fn session_for(server: &MockServer) -> Session {
    Session::new(
        SessionConfig::new()
            .with_url(server.uri())
            .with_username("designer")
            .with_password("designer"),
    )
    .unwrap()
}
