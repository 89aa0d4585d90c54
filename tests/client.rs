mod common;

use std::sync::{Arc, Mutex};

use reqwest::Method;
use serde_json::Value;

use mfm::client::query::Query;
use mfm::client::session::Session;
use mfm::client::{ApiError, Client, ClientBuilder};

use crate::common::StubServer;

fn build_client(server: &StubServer, session: Session) -> Client {
    ClientBuilder::new(server.url())
        .with_session(session)
        .build()
        .unwrap()
}

#[tokio::test]
async fn unauthorized_clears_session_and_redirects() {
    let server =
        StubServer::start(|_req| (401, String::from(r#"{"message":"token expired"}"#))).await;

    let session = Session::in_memory();
    session.set_token(Some(String::from("stale-token")));

    let redirects: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let hook_paths = redirects.clone();
    let client = ClientBuilder::new(server.url())
        .with_session(session.clone())
        .with_unauthorized_hook(move |path| hook_paths.lock().unwrap().push(path.to_string()))
        .build()
        .unwrap();

    let result: Result<Value, ApiError> = client.get("/accounts/1", None).await;
    let err = result.unwrap_err();
    assert!(err.is_unauthorized());
    // The server's error detail is discarded on purpose.
    assert_eq!(err.message, "Unauthorized - please login again");

    assert_eq!(session.token(), None);
    assert_eq!(redirects.lock().unwrap().as_slice(), ["/auth/login"]);
}

#[tokio::test]
async fn success_with_unparsable_body_resolves_null() {
    let server = StubServer::start(|_req| (200, String::from("this is not json"))).await;
    let client = build_client(&server, Session::in_memory());

    let data: Option<Value> = client
        .request(Method::POST, "/auth/logout", None, None, None)
        .await
        .unwrap();
    assert!(data.is_none());
}

#[tokio::test]
async fn success_with_empty_body_resolves_null() {
    let server = StubServer::start(|_req| (204, String::new())).await;
    let client = build_client(&server, Session::in_memory());

    let data: Option<Value> = client
        .request(Method::DELETE, "/notifications/3", None, None, None)
        .await
        .unwrap();
    assert!(data.is_none());
}

#[tokio::test]
async fn error_body_message_and_field_map_are_surfaced() {
    let server = StubServer::start(|_req| {
        (
            422,
            String::from(r#"{"message":"Validation failed","errors":{"email":["is invalid"]}}"#),
        )
    })
    .await;
    let client = build_client(&server, Session::in_memory());

    let err = client.get::<Value>("/auth/register", None).await.unwrap_err();
    assert_eq!(err.status_code, 422);
    assert_eq!(err.message, "Validation failed");
    let errors = err.errors.unwrap();
    assert_eq!(errors.get("email").unwrap(), &vec![String::from("is invalid")]);
}

#[tokio::test]
async fn error_without_body_falls_back_to_status_reason() {
    let server = StubServer::start(|_req| (500, String::new())).await;
    let client = build_client(&server, Session::in_memory());

    let err = client.get::<Value>("/reports/admin/dashboard", None).await.unwrap_err();
    assert_eq!(err.status_code, 500);
    assert_eq!(err.message, "Internal Server Error");
    assert!(err.errors.is_none());
}

#[tokio::test]
async fn transport_failure_has_status_code_zero() {
    // Take a port, then free it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ClientBuilder::new(&format!("http://{addr}")).build().unwrap();
    let err = client.get::<Value>("/users/1", None).await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.status_code, 0);
}

#[tokio::test]
async fn bearer_token_is_attached_when_present() {
    let server = StubServer::start(|_req| (200, String::from(r#"{"ok":true}"#))).await;

    let session = Session::in_memory();
    let client = build_client(&server, session.clone());

    // No token yet: no authorization header.
    let _: Value = client.get("/users", None).await.unwrap();

    session.set_token(Some(String::from("t0k3n")));
    let _: Value = client.get("/users", None).await.unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].authorization.is_none());
    assert_eq!(requests[1].authorization.as_deref(), Some("Bearer t0k3n"));
}

#[tokio::test]
async fn query_parameters_are_encoded_on_the_wire() {
    let server = StubServer::start(|_req| (200, String::from("[]"))).await;
    let client = build_client(&server, Session::in_memory());

    let query = Query::new()
        .text("status", "PENDING")
        .maybe_text("search", None::<String>)
        .integer("page", 2);
    let _: Value = client.get("/users", Some(&query)).await.unwrap();

    let requests = server.requests();
    assert_eq!(requests[0].target, "/users?status=PENDING&page=2");
}

#[tokio::test]
async fn request_body_is_serialized_as_json() {
    let server = StubServer::start(|_req| (200, String::from(r#"{"ok":true}"#))).await;
    let client = build_client(&server, Session::in_memory());

    let body = serde_json::json!({"accountId": 4, "amount": 250.0});
    let _: Option<Value> = client
        .request(Method::POST, "/transactions", Some(body), None, None)
        .await
        .unwrap();

    let requests = server.requests();
    let sent: Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(sent["accountId"], 4);
    assert_eq!(sent["amount"], 250.0);
}
