//! API Integration Tests
//!
//! Most of these tests require:
//! - Running PostgreSQL instance reachable with the configured credentials
//! - Environment variables: DB_HOST, DB_NAME, DB_PASSWORD
//!
//! They drop and recreate `sample_table`, so point them at a scratch database.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures::future::join_all;
use integration_tests::{
    assert_json, assert_status, check_test_env, drop_sample_table, fixture_pool,
    seed_sample_table, seed_typed_table, table_guard, test_config, unreachable_config,
    TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
    assert_eq!(server.wait_until_released().await, 0);
}

#[tokio::test]
async fn test_health_ready_without_database() {
    let config = unreachable_config().unwrap();
    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");

    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::SERVICE_UNAVAILABLE)
        .await
        .unwrap();
    assert_eq!(body["status"], "not_ready");
    assert!(!body.to_string().contains("hunter2"));
}

// ============================================================================
// Data Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_data_returns_all_rows() {
    if !check_test_env().await {
        return;
    }
    let _guard = table_guard().await;
    let config = test_config().unwrap();
    let pool = fixture_pool(&config);
    seed_sample_table(&pool, &[(1, "a"), (2, "b")]).await.unwrap();

    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");
    let response = server.get("/api/data").await.expect("Request failed");
    let mut rows: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();

    rows.sort_by_key(|row| row["id"].as_i64());
    assert_eq!(rows, vec![json!({"id": 1, "name": "a"}), json!({"id": 2, "name": "b"})]);
}

#[tokio::test]
async fn test_data_empty_table() {
    if !check_test_env().await {
        return;
    }
    let _guard = table_guard().await;
    let config = test_config().unwrap();
    let pool = fixture_pool(&config);
    seed_sample_table(&pool, &[]).await.unwrap();

    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");
    let response = server.get("/api/data").await.expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "[]");
}

#[tokio::test]
async fn test_data_column_types() {
    if !check_test_env().await {
        return;
    }
    let _guard = table_guard().await;
    let config = test_config().unwrap();
    let pool = fixture_pool(&config);
    seed_typed_table(&pool).await.unwrap();

    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");
    let response = server.get("/api/data").await.expect("Request failed");
    let rows: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(
        rows,
        vec![json!({
            "id": 1,
            "label": "widget",
            "price": "12.5",
            "active": true,
            "note": null,
            "released": "2024-03-01"
        })]
    );
}

#[tokio::test]
async fn test_data_missing_table_is_generic_error() {
    if !check_test_env().await {
        return;
    }
    let _guard = table_guard().await;
    let config = test_config().unwrap();
    let pool = fixture_pool(&config);
    drop_sample_table(&pool).await.unwrap();

    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");
    let response = server.get("/api/data").await.expect("Request failed");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text().await.unwrap(), "Error");
    assert_eq!(server.wait_until_released().await, 0);
}

#[tokio::test]
async fn test_data_unreachable_database() {
    let config = unreachable_config().unwrap();
    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");

    let response = server.get("/api/data").await.expect("Request failed");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.text().await.unwrap();
    assert_eq!(body, "Error");
    assert!(!body.contains("127.0.0.1"));
    assert_eq!(server.pool_status().in_use, 0);
}

#[tokio::test]
async fn test_data_concurrent_requests() {
    if !check_test_env().await {
        return;
    }
    let _guard = table_guard().await;
    let config = test_config().unwrap();
    let max_connections = config.database.max_connections;
    let pool = fixture_pool(&config);
    seed_sample_table(&pool, &[(1, "a"), (2, "b")]).await.unwrap();

    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");

    let done = AtomicBool::new(false);
    let requests = async {
        let responses = join_all((0..50).map(|_| server.get("/api/data"))).await;
        done.store(true, Ordering::Release);
        responses
    };
    // Pool high-water marks, read while the requests hold connections
    let sampler = async {
        let (mut peak_size, mut peak_in_use) = (0, 0);
        loop {
            let finished = done.load(Ordering::Acquire);
            let status = server.pool_status();
            peak_size = peak_size.max(status.size);
            peak_in_use = peak_in_use.max(status.in_use);
            if finished {
                break (peak_size, peak_in_use);
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    };
    let (responses, (peak_size, peak_in_use)) = tokio::join!(requests, sampler);

    for response in responses {
        let response = response.expect("Request failed");
        assert_status(response, StatusCode::OK).await.unwrap();
    }
    assert!(peak_size > 0, "pool never opened a connection");
    assert!(peak_size <= max_connections, "pool grew to {peak_size}");
    assert!(peak_in_use <= max_connections, "{peak_in_use} connections checked out");
    assert_eq!(server.wait_until_released().await, 0);
}
