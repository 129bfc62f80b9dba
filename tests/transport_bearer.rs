//! The GraphQL transport against a mock HTTP endpoint.

mod common;

use common::TestEnv;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bidmart::api::{self, GraphQLMarketplace, MarketplaceApi, TransportError};
use bidmart::session::{save_session, Session, SessionStore, StoredSession};

const PRODUCTS_BODY: &str =
    r#"{"data":{"products":[{"id":"p1","name":"Bicycle","price":4500},{"id":"p2"}]}}"#;

fn graphql_url(server: &MockServer) -> String {
    format!("{}/graphql", server.uri())
}

fn client(server: &MockServer, store: Arc<dyn SessionStore>) -> GraphQLMarketplace {
    api::connect(&graphql_url(server), Arc::new(StoredSession::new(store)))
}

fn json_response(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status)
        .insert_header("content-type", "application/json")
        .set_body_string(body)
}

#[tokio::test]
async fn test_anonymous_request_has_no_authorization() {
    let env = TestEnv::new();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({ "operationName": "GetProducts" })))
        .respond_with(json_response(200, PRODUCTS_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let products = client(&server, env.store()).products().await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name.as_deref(), Some("Bicycle"));
    assert_eq!(products[1].price, None);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());

    let body: Value = requests[0].body_json().unwrap();
    assert!(body["query"].as_str().unwrap().contains("products"));
}

#[tokio::test]
async fn test_stored_id_token_is_sent_as_bearer() {
    let env = TestEnv::new();
    let store = env.store();
    save_session(
        store.as_ref(),
        &Session::new("access-token", "id-token-xyz", "refresh-token"),
    )
    .unwrap();

    let server = MockServer::start().await;
    // Only the ID token is ever sent
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "Bearer id-token-xyz"))
        .respond_with(json_response(200, PRODUCTS_BODY))
        .expect(1)
        .mount(&server)
        .await;

    client(&server, store).products().await.unwrap();
}

#[tokio::test]
async fn test_token_is_read_per_request() {
    let env = TestEnv::new();
    let store = env.store();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(json_response(200, PRODUCTS_BODY))
        .expect(2)
        .mount(&server)
        .await;

    let api = client(&server, store.clone());
    api.products().await.unwrap();
    save_session(store.as_ref(), &Session::new("a", "fresh-id", "r")).unwrap();
    api.products().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(
        requests[1]
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok()),
        Some("Bearer fresh-id")
    );
}

#[tokio::test]
async fn test_variables_are_sent() {
    let env = TestEnv::new();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "SendOTP",
            "variables": { "phoneNumber": "+919876543210" }
        })))
        .respond_with(json_response(
            200,
            r#"{"data":{"sendOTP":{"success":true,"isNewUser":false}}}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let payload = client(&server, env.store())
        .send_otp("+919876543210")
        .await
        .unwrap()
        .unwrap();
    assert!(payload.success);
    assert!(!payload.is_new_user());
}

#[tokio::test]
async fn test_graphql_errors_are_joined() {
    let env = TestEnv::new();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(json_response(
            200,
            r#"{"data":null,"errors":[{"message":"Unauthorized"},{"message":"token expired"}]}"#,
        ))
        .mount(&server)
        .await;

    let err = client(&server, env.store()).products().await.unwrap_err();
    assert_eq!(err.user_message("fallback"), "Unauthorized, token expired");
}

#[tokio::test]
async fn test_http_failure_without_errors() {
    let env = TestEnv::new();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client(&server, env.store()).product("p1").await.unwrap_err();
    assert_eq!(err, TransportError::Http { status: 502 });
    assert_eq!(
        err.user_message("fallback"),
        "Response not successful: Received status code 502"
    );
}

#[tokio::test]
async fn test_unreachable_endpoint_is_a_network_error() {
    let env = TestEnv::new();
    let server = MockServer::start().await;
    let url = graphql_url(&server);
    // Nothing listens once the server is gone
    drop(server);

    let api = api::connect(&url, Arc::new(StoredSession::new(env.store())));
    let err = api.products().await.unwrap_err();
    assert!(matches!(err, TransportError::Network(_)));
    assert!(!err.user_message("fallback").is_empty());
}
