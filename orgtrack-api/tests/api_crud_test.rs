/// End-to-end tests for the CRUD API
///
/// Each test drives the full stack (router, services, models, PostgreSQL)
/// through tower without a listening socket. Requires a reachable test
/// database; `DATABASE_URL` overrides the default connection string.
mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::json;

#[tokio::test]
async fn test_create_department_then_fetch_round_trip() {
    let ctx = TestContext::new().await.unwrap();

    let (status, created) = ctx
        .send_json(
            "POST",
            "/departments/",
            Some(json!({ "department_name": "Engineering" })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let id = created["department_id"].as_i64().unwrap();
    assert_eq!(created["department_name"], "Engineering");

    let (status, fetched) = ctx
        .send_json("GET", &format!("/departments/{}", id), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["department_id"], json!(id));
    assert_eq!(fetched["department_name"], "Engineering");
    assert_eq!(fetched["user_list"], json!([]));
    assert_eq!(fetched["task_list"], json!([]));
}

#[tokio::test]
async fn test_create_task_with_no_assignees() {
    let ctx = TestContext::new().await.unwrap();
    let department_id = ctx.create_department("Support").await;

    let (status, created) = ctx
        .send_json(
            "POST",
            "/tasks/",
            Some(json!({
                "task_name": "Triage inbox",
                "department": { "department_id": department_id, "department_name": "Support" }
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["task_name"], "Triage inbox");
    assert_eq!(created["department"]["department_id"], json!(department_id));
    assert_eq!(created["user_list"], json!([]));
}

#[tokio::test]
async fn test_task_create_links_only_same_department_assignees() {
    let ctx = TestContext::new().await.unwrap();
    let home_id = ctx.create_department("Platform").await;
    let other_id = ctx.create_department("Sales").await;

    let insider = ctx.create_user("Ada", "Lovelace", home_id).await;
    let outsider = ctx.create_user("Grace", "Hopper", other_id).await;

    let (status, created) = ctx
        .send_json(
            "POST",
            "/tasks/",
            Some(json!({
                "task_name": "Quarterly report",
                "department": { "department_id": home_id, "department_name": "Platform" },
                "user_list": [
                    {
                        "user_id": insider,
                        "user_firstname": "Ada",
                        "user_lastname": "Lovelace",
                        "department": { "department_id": home_id, "department_name": "Platform" }
                    },
                    {
                        "user_id": outsider,
                        "user_firstname": "Grace",
                        "user_lastname": "Hopper",
                        "department": { "department_id": other_id, "department_name": "Sales" }
                    }
                ]
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let assigned = created["user_list"].as_array().unwrap();
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0]["user_id"], json!(insider));
}

#[tokio::test]
async fn test_task_create_without_department_is_rejected() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .send_json("POST", "/tasks/", Some(json!({ "task_name": "Orphan" })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_update_user_with_id_free_body() {
    let ctx = TestContext::new().await.unwrap();
    let department_id = ctx.create_department("QA").await;
    let user_id = ctx.create_user("Ada", "Lovelace", department_id).await;

    // The body carries no user_id; the path segment decides the target.
    let (status, _) = ctx
        .send_json(
            "PUT",
            &format!("/users/{}", user_id),
            Some(json!({
                "user_firstname": "Augusta",
                "user_lastname": "King",
                "department": { "department_id": department_id, "department_name": "QA" }
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);

    let (status, fetched) = ctx
        .send_json("GET", &format!("/users/{}", user_id), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["user_id"], json!(user_id));
    assert_eq!(fetched["user_firstname"], "Augusta");
    assert_eq!(fetched["user_lastname"], "King");
}

#[tokio::test]
async fn test_delete_task_removes_assignments_and_task() {
    let ctx = TestContext::new().await.unwrap();
    let department_id = ctx.create_department("Ops").await;
    let user_id = ctx.create_user("Lin", "Chen", department_id).await;

    let (status, created) = ctx
        .send_json(
            "POST",
            "/tasks/",
            Some(json!({
                "task_name": "Rotate credentials",
                "department": { "department_id": department_id, "department_name": "Ops" },
                "user_list": [{
                    "user_id": user_id,
                    "user_firstname": "Lin",
                    "user_lastname": "Chen",
                    "department": { "department_id": department_id, "department_name": "Ops" }
                }]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let task_id = created["task_id"].as_i64().unwrap();

    let (status, _) = ctx
        .send_json("DELETE", &format!("/tasks/{}", task_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = ctx
        .send_json("GET", &format!("/tasks/{}", task_id), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The assignee survives with an empty task list.
    let (status, user) = ctx
        .send_json("GET", &format!("/users/{}", user_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let tasks = user["task_list"].as_array().unwrap();
    assert!(!tasks.iter().any(|t| t["task_id"] == json!(task_id)));
}

#[tokio::test]
async fn test_get_unknown_department_returns_404() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .send_json("GET", "/departments/999999999", None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_non_numeric_id_segment_returns_400() {
    let ctx = TestContext::new().await.unwrap();

    let (status, _) = ctx.send_json("GET", "/departments/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx
        .send_json(
            "PUT",
            "/tasks/abc",
            Some(json!({
                "task_name": "Misaddressed",
                "department": { "department_id": 1, "department_name": "" }
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx.send_json("DELETE", "/users/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_on_collection_root_returns_400() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .send_json(
            "PUT",
            "/departments/",
            Some(json!({ "department_name": "Nameless" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, _) = ctx.send_json("DELETE", "/tasks/", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_department_fetch_includes_members_and_tasks() {
    let ctx = TestContext::new().await.unwrap();
    let department_id = ctx.create_department("Research").await;
    let user_id = ctx.create_user("Mary", "Somerville", department_id).await;

    let (status, created) = ctx
        .send_json(
            "POST",
            "/tasks/",
            Some(json!({
                "task_name": "Literature survey",
                "department": { "department_id": department_id, "department_name": "Research" }
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let task_id = created["task_id"].as_i64().unwrap();

    let (status, fetched) = ctx
        .send_json("GET", &format!("/departments/{}", department_id), None)
        .await;

    assert_eq!(status, StatusCode::OK);

    let users = fetched["user_list"].as_array().unwrap();
    assert!(users.iter().any(|u| u["user_id"] == json!(user_id)));

    let tasks = fetched["task_list"].as_array().unwrap();
    let task = tasks
        .iter()
        .find(|t| t["task_id"] == json!(task_id))
        .unwrap();

    // Children carry a shallow department, not the full graph.
    assert_eq!(task["department"]["department_id"], json!(department_id));
    assert_eq!(task["department"]["user_list"], json!([]));
}

#[tokio::test]
async fn test_health_endpoint_reports_connected() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.send_json("GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}
