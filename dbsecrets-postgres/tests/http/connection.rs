use crate::context::{ReadOnlyStorage, TestServer};
use dbsecrets_postgres::algebra::config_store::CONFIG_CONNECTION_KEY;
use http::{Method, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;

const PATH: &str = "config/connection";

#[tokio::test]
async fn test_root() {
    let server = TestServer::new().await.expect("Failed to create server");

    let res = server
        .send_request::<Value, Value>("", Method::GET, None)
        .await
        .expect("Failed to send request");

    assert_eq!(res.code, StatusCode::OK);
    assert_eq!(res.data, json!({ "success": true }));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let server = TestServer::new().await.expect("Failed to create server");

    let res = server
        .send_request::<Value, Value>("config/unknown", Method::GET, None)
        .await
        .expect("Failed to send request");

    assert_eq!(res.code, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_then_read_applies_defaults_and_redacts() {
    let server = TestServer::new().await.expect("Failed to create server");

    let res = server
        .send_request::<Value, Value>(
            PATH,
            Method::POST,
            Some(&json!({ "connection_url": "postgres://app:hunter2@db:5432/app" })),
        )
        .await
        .expect("Failed to send request");

    assert_eq!(res.code, StatusCode::NO_CONTENT);

    let res = server
        .send_request::<Value, Value>(PATH, Method::GET, None)
        .await
        .expect("Failed to send request");

    assert_eq!(res.code, StatusCode::OK);
    assert_eq!(
        res.data,
        json!({
            "connection_url": "****",
            "value": "",
            "max_open_connections": 2,
            "max_idle_connections": 2,
        })
    );

    let stored = server
        .storage
        .get(CONFIG_CONNECTION_KEY)
        .await
        .expect("Failed to read storage")
        .expect("Record missing");
    let stored: Value = stored.decode_json().expect("Record is not json");
    assert_eq!(
        stored["connection_url"],
        json!("postgres://app:hunter2@db:5432/app")
    );
}

#[tokio::test]
async fn test_update_clamps_idle_connections() {
    let server = TestServer::new().await.expect("Failed to create server");

    let res = server
        .send_request::<Value, Value>(
            PATH,
            Method::POST,
            Some(&json!({
                "value": "host=db user=app dbname=app",
                "max_open_connections": 5,
                "max_idle_connections": 10,
            })),
        )
        .await
        .expect("Failed to send request");
    assert_eq!(res.code, StatusCode::NO_CONTENT);

    let res = server
        .send_request::<Value, Value>(PATH, Method::GET, None)
        .await
        .expect("Failed to send request");

    assert_eq!(res.data["value"], json!("****"));
    assert_eq!(res.data["max_open_connections"], json!(5));
    assert_eq!(res.data["max_idle_connections"], json!(5));
}

#[tokio::test]
async fn test_rejected_update_is_soft_failure_and_keeps_previous_config() {
    let server = TestServer::new().await.expect("Failed to create server");

    let res = server
        .send_request::<Value, Value>(
            PATH,
            Method::POST,
            Some(&json!({ "connection_url": "postgres://db/app", "max_open_connections": 7 })),
        )
        .await
        .expect("Failed to send request");
    assert_eq!(res.code, StatusCode::NO_CONTENT);

    let res = server
        .send_request::<Value, Value>(
            PATH,
            Method::POST,
            Some(&json!({ "connection_url": "postgres://unreachable/app" })),
        )
        .await
        .expect("Failed to send request");

    assert_eq!(res.code, StatusCode::BAD_REQUEST);
    assert_eq!(
        res.data,
        json!({ "error": "Error validating connection info: dial tcp: connection refused" })
    );

    let res = server
        .send_request::<Value, Value>(PATH, Method::GET, None)
        .await
        .expect("Failed to send request");
    assert_eq!(res.data["max_open_connections"], json!(7));
}

#[tokio::test]
async fn test_update_without_connection_string_is_rejected() {
    let server = TestServer::new().await.expect("Failed to create server");

    let res = server
        .send_request::<Value, Value>(PATH, Method::POST, Some(&json!({})))
        .await
        .expect("Failed to send request");

    assert_eq!(res.code, StatusCode::BAD_REQUEST);
    assert_eq!(
        res.data,
        json!({ "error": "Error validating connection info: connection_url must be provided" })
    );

    let res = server
        .send_request::<Value, Value>(PATH, Method::GET, None)
        .await
        .expect("Failed to send request");
    assert_eq!(res.code, StatusCode::NOT_FOUND);
    assert_eq!(res.data["error"]["type"], json!("NotFound"));
    assert_eq!(res.data["error"]["key"], json!("err::application::not_found"));
    assert_eq!(
        res.data["error"]["message"],
        json!("No connection configuration has been written")
    );
}

#[tokio::test]
async fn test_storage_failure_is_hard_failure() {
    let server = TestServer::with_storage(Arc::new(ReadOnlyStorage))
        .await
        .expect("Failed to create server");

    let res = server
        .send_request::<Value, Value>(
            PATH,
            Method::POST,
            Some(&json!({ "connection_url": "postgres://db/app" })),
        )
        .await
        .expect("Failed to send request");

    assert_eq!(res.code, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.data["error"]["key"].is_string());
    assert_eq!(
        res.data["error"]["message"],
        json!("An unknown error occurred")
    );
}

#[tokio::test]
async fn test_help() {
    let server = TestServer::new().await.expect("Failed to create server");

    let res = server
        .send_request::<Value, Value>("config/connection/help", Method::GET, None)
        .await
        .expect("Failed to send request");

    assert_eq!(res.code, StatusCode::OK);
    assert_eq!(
        res.data["synopsis"],
        json!("Configure the connection string to talk to PostgreSQL.")
    );
    assert!(res.data["description"]
        .as_str()
        .is_some_and(|description| description.contains("postgresql://")));
    assert!(res.data["fields"]["max_idle_connections"].is_string());
}

#[tokio::test]
async fn test_probe_without_configuration_is_not_found() {
    let server = TestServer::new().await.expect("Failed to create server");

    let res = server
        .send_request::<Value, Value>("probe", Method::GET, None)
        .await
        .expect("Failed to send request");

    assert_eq!(res.code, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_probe_against_unreachable_server_fails() {
    let server = TestServer::new().await.expect("Failed to create server");

    let res = server
        .send_request::<Value, Value>(
            PATH,
            Method::POST,
            Some(&json!({ "connection_url": "postgres://postgres@127.0.0.1:1/postgres" })),
        )
        .await
        .expect("Failed to send request");
    assert_eq!(res.code, StatusCode::NO_CONTENT);

    let res = server
        .send_request::<Value, Value>("probe", Method::GET, None)
        .await
        .expect("Failed to send request");

    assert!(res.code.is_server_error(), "unexpected status {}", res.code);
}
