// Integration tests: HTTP endpoints through the full router

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use common::{FakeRuntime, TEST_TOKEN, insert_cpu, insert_memory, runtime_container, temp_repo};
use sentinel::config::AppConfig;
use sentinel::disk_repo::DiskRepo;
use sentinel::metrics_repo::MetricsRepo;
use sentinel::models::HealthStatus;
use sentinel::routes;
use std::collections::HashMap;
use std::sync::Arc;

fn server(repo: MetricsRepo, runtime: Arc<FakeRuntime>, debug: bool) -> TestServer {
    let config = AppConfig::load_from_str(&common::test_config_str(debug)).unwrap();
    let app = routes::app(
        Arc::new(repo),
        runtime,
        Arc::new(DiskRepo::new(".")),
        config,
    );
    TestServer::new(app)
}

const PROTECTED: [&str; 4] = [
    "/api/containers",
    "/api/disk",
    "/api/container/abc/cpu/history",
    "/api/container/abc/memory/history",
];

#[tokio::test]
async fn test_health_and_version_are_public() {
    let (_dir, repo) = temp_repo(true).await;
    let server = server(repo, Arc::new(FakeRuntime::default()), false);

    let response = server.get("/api/health").await;
    response.assert_status_ok();
    response.assert_text("ok");

    let response = server.get("/api/version").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json.get("name").and_then(|v| v.as_str()), Some("sentinel"));
    assert!(json.get("version").and_then(|v| v.as_str()).is_some());
}

#[tokio::test]
async fn test_missing_or_wrong_token_is_rejected_without_side_effects() {
    // No tables: any store access would turn into a 500.
    let (_dir, repo) = temp_repo(false).await;
    let runtime = Arc::new(FakeRuntime {
        containers: vec![runtime_container("abc", &["/web"], "running")],
        ..Default::default()
    });
    let server = server(repo, runtime.clone(), false);

    for path in PROTECTED {
        let response = server.get(path).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let json: serde_json::Value = response.json();
        assert_eq!(json["error"], "Unauthorized");

        server
            .get(path)
            .authorization_bearer("wrong")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        server
            .get(path)
            .authorization_bearer(format!("{TEST_TOKEN}x"))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
    assert_eq!(runtime.calls(), 0);
}

#[tokio::test]
async fn test_containers_lists_all_with_degraded_health() {
    let (_dir, repo) = temp_repo(true).await;
    let runtime = Arc::new(FakeRuntime {
        containers: vec![
            runtime_container("aaaaaaaaaaaa1111", &["/web-1"], "running"),
            runtime_container("bbbbbbbbbbbb2222", &["/db"], "exited"),
            runtime_container("abcdef0123456789", &[], "created"),
        ],
        health: HashMap::from([
            ("aaaaaaaaaaaa1111".to_string(), Some(HealthStatus::Healthy)),
            ("abcdef0123456789".to_string(), None),
        ]),
        ..Default::default()
    });
    let server = server(repo, runtime, false);

    let response = server
        .get("/api/containers")
        .authorization_bearer(TEST_TOKEN)
        .await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 3);

    assert_eq!(list[0]["name"], "web-1");
    assert_eq!(list[0]["health_status"], "healthy");
    assert_eq!(list[0]["state"], "running");
    assert_eq!(list[0]["labels"]["coolify.managed"], "true");
    assert_eq!(list[0]["image"], "aaaaaaaaaaaa1111-image:latest");

    // inspect fails for the second one
    assert_eq!(list[1]["name"], "db");
    assert_eq!(list[1]["health_status"], "unknown");
    assert_eq!(list[1]["state"], "exited");

    assert_eq!(list[2]["name"], "abcdef012345");
    assert_eq!(list[2]["health_status"], "unknown");

    let time = list[0]["time"].as_str().unwrap();
    assert!(sentinel::time_window::parse_wire_millis(time).is_some());
}

#[tokio::test]
async fn test_containers_runtime_down_is_500() {
    let (_dir, repo) = temp_repo(true).await;
    let runtime = Arc::new(FakeRuntime {
        list_fails: true,
        ..Default::default()
    });
    let server = server(repo, runtime, false);
    let response = server
        .get("/api/containers")
        .authorization_bearer(TEST_TOKEN)
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = response.json();
    assert!(json["error"].as_str().unwrap().starts_with("docker api error"));
}

#[tokio::test]
async fn test_disk_reports_usage() {
    let (_dir, repo) = temp_repo(true).await;
    let server = server(repo, Arc::new(FakeRuntime::default()), false);
    let response = server.get("/api/disk").authorization_bearer(TEST_TOKEN).await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    let total = json["total"].as_u64().unwrap();
    let used = json["used"].as_u64().unwrap();
    let free = json["free"].as_u64().unwrap();
    assert_eq!(total, used + free);
    assert!(json["usedPercent"].as_f64().is_some());
}

#[tokio::test]
async fn test_cpu_history_defaults_window() {
    let (_dir, repo) = temp_repo(true).await;
    insert_cpu(&repo, "1704067200000", "abc", "12.5").await;
    insert_cpu(&repo, "500", "abc", "1.0").await; // before the default lower bound
    let server = server(repo, Arc::new(FakeRuntime::default()), false);

    let response = server
        .get("/api/container/abc/cpu/history")
        .authorization_bearer(TEST_TOKEN)
        .await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(
        json,
        serde_json::json!([{ "time": "1704067200000", "percent": 12.5 }])
    );
}

#[tokio::test]
async fn test_cpu_history_window_and_debug_rendering() {
    let (_dir, repo) = temp_repo(true).await;
    insert_cpu(&repo, "1704067200000", "abc", "1").await;
    insert_cpu(&repo, "1704070800000", "abc", "2").await;
    insert_cpu(&repo, "1704153600000", "abc", "3").await;
    let server = server(repo, Arc::new(FakeRuntime::default()), true);

    let response = server
        .get("/api/container/abc/cpu/history")
        .add_query_param("from", "2024-01-01T00:00:00Z")
        .add_query_param("to", "2024-01-01T01:00:00Z")
        .authorization_bearer(TEST_TOKEN)
        .await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["humanFriendlyTime"], "2024-01-01T00:00:00Z");
    assert_eq!(list[1]["humanFriendlyTime"], "2024-01-01T01:00:00Z");
}

#[tokio::test]
async fn test_history_inverted_window_is_empty_200() {
    let (_dir, repo) = temp_repo(true).await;
    insert_cpu(&repo, "1704067200000", "abc", "1").await;
    let server = server(repo, Arc::new(FakeRuntime::default()), false);
    let response = server
        .get("/api/container/abc/cpu/history")
        .add_query_param("from", "2024-02-01T00:00:00Z")
        .add_query_param("to", "2024-01-01T00:00:00Z")
        .authorization_bearer(TEST_TOKEN)
        .await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn test_history_malformed_boundary_is_400_before_storage() {
    // No tables: reaching the store would be a 500, not a 400.
    let (_dir, repo) = temp_repo(false).await;
    let server = server(repo, Arc::new(FakeRuntime::default()), false);

    for kind in ["cpu", "memory"] {
        let response = server
            .get(&format!("/api/container/abc/{kind}/history"))
            .add_query_param("from", "2024-13-50")
            .authorization_bearer(TEST_TOKEN)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let json: serde_json::Value = response.json();
        assert_eq!(
            json["error"],
            "Invalid 'from' date format. Use YYYY-MM-DDTHH:MM:SSZ"
        );

        let response = server
            .get(&format!("/api/container/abc/{kind}/history"))
            .add_query_param("to", "2024-01-01T00:00:00.500Z")
            .authorization_bearer(TEST_TOKEN)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_history_unparseable_query_is_json_400() {
    let (_dir, repo) = temp_repo(false).await;
    let server = server(repo, Arc::new(FakeRuntime::default()), false);

    for kind in ["cpu", "memory"] {
        let response = server
            .get(&format!("/api/container/abc/{kind}/history"))
            .add_raw_query_param("from=2024-01-01T00:00:00Z&from=2024-01-02T00:00:00Z")
            .authorization_bearer(TEST_TOKEN)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let json: serde_json::Value = response.json();
        let message = json["error"].as_str().unwrap();
        assert!(message.starts_with("Invalid query string"), "{message}");
    }
}

#[tokio::test]
async fn test_history_leap_second_boundary_is_400() {
    let (_dir, repo) = temp_repo(false).await;
    let server = server(repo, Arc::new(FakeRuntime::default()), false);
    let response = server
        .get("/api/container/abc/cpu/history")
        .add_query_param("to", "2024-01-01T00:00:60Z")
        .authorization_bearer(TEST_TOKEN)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let json: serde_json::Value = response.json();
    assert_eq!(json["error"], "Invalid 'to' date format. Use YYYY-MM-DDTHH:MM:SSZ");
}

#[tokio::test]
async fn test_history_storage_failure_is_500() {
    let (_dir, repo) = temp_repo(false).await;
    let server = server(repo, Arc::new(FakeRuntime::default()), false);
    let response = server
        .get("/api/container/abc/cpu/history")
        .authorization_bearer(TEST_TOKEN)
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_memory_history_with_corrupt_row() {
    let (_dir, repo) = temp_repo(true).await;
    insert_memory(&repo, "1704067200000", "abc", ["2048", "1024", "oops", "50.5", "1024"]).await;
    let server = server(repo, Arc::new(FakeRuntime::default()), false);

    let response = server
        .get("/api/container/abc/memory/history")
        .authorization_bearer(TEST_TOKEN)
        .await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(
        json,
        serde_json::json!([{
            "time": "1704067200000",
            "total": 2048,
            "available": 1024,
            "used": 0,
            "usedPercent": 50.5,
            "free": 1024
        }])
    );
}

#[tokio::test]
async fn test_history_sanitizes_container_id() {
    let (_dir, repo) = temp_repo(true).await;
    insert_cpu(&repo, "1704067200000", "my.app-1", "1").await;
    let server = server(repo, Arc::new(FakeRuntime::default()), false);

    // `;` and `'` are stripped, leaving the stored id
    let response = server
        .get("/api/container/my.app-1%3B'/cpu/history")
        .authorization_bearer(TEST_TOKEN)
        .await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json.as_array().unwrap().len(), 1);
}
