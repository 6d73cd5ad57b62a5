//! Business, user, menu and table administration

mod common;

use http::StatusCode;
use serde_json::json;

use common::{ADMIN_ID, ALICE_ID, TestApp, WAITER_ID};

#[tokio::test]
async fn admin_manages_businesses() {
    let app = TestApp::new();
    let admin = app.admin();

    let res = app
        .post("/api/admin/businesses", &admin, json!({"name": "  Samsa Bar  "}))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["name"], "Samsa Bar");
    assert_eq!(res.body["status"], "active");
    let id = res.body["id"].as_i64().unwrap();

    let res = app
        .put(
            &format!("/api/admin/businesses/{id}/status"),
            &admin,
            json!({"status": "suspended"}),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "suspended");

    let res = app.get(&format!("/api/admin/businesses/{id}"), &admin).await;
    assert_eq!(res.body["status"], "suspended");

    let res = app.post("/api/admin/businesses", &admin, json!({"name": ""})).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app.get("/api/admin/businesses/999", &admin).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_user_lifecycle() {
    let app = TestApp::new();
    let admin = app.admin();

    let res = app
        .post(
            "/api/admin/users",
            &admin,
            json!({"username": "zara", "password": "pw", "role": "cook", "business_id": 4}),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED, "{:?}", res.body);
    assert!(res.body.get("password_hash").is_none());
    let id = res.body["id"].as_i64().unwrap();

    let res = app
        .post(
            "/api/admin/users",
            &admin,
            json!({"username": "zara", "password": "pw", "role": "cook", "business_id": 4}),
        )
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);

    let res = app
        .post(
            "/api/admin/users",
            &admin,
            json!({"username": "nobody", "password": "pw", "role": "waiter"}),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app.delete(&format!("/api/admin/users/{id}"), &admin).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let res = app.delete(&format!("/api/admin/users/{ADMIN_ID}"), &admin).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn user_with_orders_cannot_be_deleted() {
    let app = TestApp::new();
    app.place_order().await;

    let res = app
        .delete(&format!("/api/admin/users/{WAITER_ID}"), &app.admin())
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn admin_user_list_follows_business_context() {
    let app = TestApp::new();
    let res = app.get("/api/admin/users", &app.admin()).await;
    assert_eq!(res.body.as_array().unwrap().len(), 5);

    let req = http::Request::builder()
        .uri("/api/admin/users")
        .header(http::header::AUTHORIZATION, format!("Bearer {}", app.admin()))
        .header("x-business-id", "4")
        .body(axum::body::Body::empty())
        .unwrap();
    let res = app.send(req).await;
    assert!(res.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn manager_creates_staff_in_own_business() {
    let app = TestApp::new();
    let manager = app.manager();

    let res = app
        .post(
            "/api/manager/users",
            &manager,
            json!({"username": "nodir", "password": "pw", "role": "waiter", "business_id": 4}),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["business_id"], 3);

    let res = app
        .post(
            "/api/manager/users",
            &manager,
            json!({"username": "boss", "password": "pw", "role": "admin"}),
        )
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = app.get("/api/manager/users", &manager).await;
    let users = res.body.as_array().unwrap();
    assert!(users.iter().all(|u| u["business_id"] == 3));
    assert!(users.iter().any(|u| u["id"] == ALICE_ID));
}

#[tokio::test]
async fn manager_builds_menu_and_tables() {
    let app = TestApp::new();
    let manager = app.manager();

    let res = app
        .post("/api/manager/menu/categories", &manager, json!({"name": "Soups"}))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    let category_id = res.body["id"].as_i64().unwrap();

    let res = app
        .post("/api/manager/menu/categories", &manager, json!({"name": "Soups"}))
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);

    let res = app
        .post(
            "/api/manager/menu/items",
            &manager,
            json!({"name": "Shurpa", "categoryId": category_id, "price": 7.5}),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED, "{:?}", res.body);
    assert_eq!(res.body["business_id"], 3);
    assert_eq!(res.body["is_available"], true);

    let res = app
        .post(
            "/api/manager/menu/items",
            &manager,
            json!({"name": "Free soup", "categoryId": category_id, "price": 0}),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    // Category of another business
    let res = app
        .post(
            "/api/manager/menu/items",
            &manager,
            json!({"name": "Lagman", "categoryId": 2, "price": 5}),
        )
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let menu = app.get("/api/waiter/menu", &app.waiter()).await;
    let categories = menu.body.as_array().unwrap();
    assert_eq!(categories.len(), 2);
    assert!(categories.iter().all(|c| c["business_id"] == 3));

    let res = app
        .post("/api/manager/tables", &manager, json!({"number": 2, "seats": 6}))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["status"], "free");

    let res = app
        .post("/api/manager/tables", &manager, json!({"number": 2, "seats": 2}))
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);

    let res = app
        .post("/api/manager/tables", &manager, json!({"number": 3, "seats": 0}))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}
