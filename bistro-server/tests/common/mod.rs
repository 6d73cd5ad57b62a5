//! Shared fixture: the full router over a seeded in-memory store

#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Request, StatusCode, header};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use bistro_server::auth::jwt::token_ttl;
use bistro_server::auth::password::hash_password;
use bistro_server::db::{MemoryStore, Repositories};
use bistro_server::{AppState, Config, api};
use shared::models::{
    Business, BusinessStatus, Category, DiningTable, MenuItem, Role, TableStatus, User, UserStatus,
};

pub const SECRET: &str = "integration-test-secret-0123456789abcdef";

pub const ADMIN_ID: i64 = 1;
pub const ALICE_ID: i64 = 7;
pub const WAITER_ID: i64 = 8;
pub const COOK_ID: i64 = 9;
pub const CASHIER_ID: i64 = 11;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    }

    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

fn user(id: i64, username: &str, password: &str, role: Role, business_id: Option<i64>) -> User {
    User {
        id,
        username: username.into(),
        password_hash: hash_password(password).unwrap(),
        email: String::new(),
        name: String::new(),
        role,
        status: UserStatus::Active,
        business_id,
        last_active_at: None,
        created_at: 0,
        updated_at: 0,
    }
}

fn business(id: i64, name: &str) -> Business {
    Business {
        id,
        name: name.into(),
        status: BusinessStatus::Active,
        phone: None,
        email: None,
        address: None,
        created_at: 0,
        updated_at: 0,
    }
}

fn dish(id: i64, name: &str, price: &str, category_id: i64, business_id: i64) -> MenuItem {
    MenuItem {
        id,
        name: name.into(),
        category_id,
        business_id,
        price: Decimal::from_str(price).unwrap(),
        is_available: true,
        description: None,
        created_at: 0,
        updated_at: 0,
    }
}

pub fn free_table(id: i64, number: i32, business_id: i64) -> DiningTable {
    DiningTable {
        id,
        number,
        seats: 4,
        status: TableStatus::Free,
        reserved_at: None,
        occupied_at: None,
        business_id,
    }
}

impl TestApp {
    /// Businesses 3 and 4; table 10 and dish 20 "Plov" in 3; dish 21 in 4
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());

        store.seed_business(business(3, "Chaikhana"));
        store.seed_business(business(4, "Lagman House"));

        store.seed_user(user(ADMIN_ID, "root", "rootpw", Role::Admin, None));
        store.seed_user(user(ALICE_ID, "alice", "s3cret", Role::Manager, Some(3)));
        store.seed_user(user(WAITER_ID, "walt", "waiterpw", Role::Waiter, Some(3)));
        store.seed_user(user(COOK_ID, "kuka", "cookpw", Role::Cook, Some(3)));
        store.seed_user(user(CASHIER_ID, "cash", "cashpw", Role::Cashier, Some(3)));

        store.seed_category(Category {
            id: 1,
            name: "Mains".into(),
            business_id: 3,
        });
        store.seed_category(Category {
            id: 2,
            name: "Mains".into(),
            business_id: 4,
        });
        store.seed_item(dish(20, "Plov", "12.50", 1, 3));
        store.seed_item(dish(21, "Lagman", "9.00", 2, 4));
        store.seed_table(free_table(10, 1, 3));

        let state =
            AppState::with_repositories(Config::for_memory(SECRET), Repositories::memory(store.clone()));
        let app = api::build_app(state.clone());
        Self { app, state, store }
    }

    pub fn token(&self, user_id: i64, role: Role, business_id: Option<i64>) -> String {
        self.state
            .jwt_service
            .generate_token(user_id, role, business_id, token_ttl(false))
            .unwrap()
    }

    pub fn waiter(&self) -> String {
        self.token(WAITER_ID, Role::Waiter, Some(3))
    }

    pub fn manager(&self) -> String {
        self.token(ALICE_ID, Role::Manager, Some(3))
    }

    pub fn cook(&self) -> String {
        self.token(COOK_ID, Role::Cook, Some(3))
    }

    /// Seed a deactivated user of business 3 and return its id
    pub fn seed_inactive_user(&self, id: i64, username: &str, password: &str) -> i64 {
        let mut inactive = user(id, username, password, Role::Waiter, Some(3));
        inactive.status = UserStatus::Inactive;
        self.store.seed_user(inactive);
        id
    }

    pub fn admin(&self) -> String {
        self.token(ADMIN_ID, Role::Admin, None)
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: &str) -> TestResponse {
        self.send(request("GET", uri, Some(token), None)).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.send(request("POST", uri, Some(token), Some(body))).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.send(request("PUT", uri, Some(token), Some(body))).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> TestResponse {
        self.send(request("DELETE", uri, Some(token), None)).await
    }

    /// Create an order for table 10 with two Plov and return its id
    pub async fn place_order(&self) -> i64 {
        let res = self
            .post(
                "/api/waiter/orders",
                &self.waiter(),
                serde_json::json!({"tableId": 10, "items": [{"dishId": 20, "quantity": 2}]}),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{:?}", res.body);
        res.body["id"].as_i64().unwrap()
    }

    /// Walk an order from `new` to `served` through the waiter and kitchen endpoints
    pub async fn serve_order(&self, id: i64) {
        let waiter = self.waiter();
        for status in ["accepted", "preparing"] {
            let res = self
                .put(
                    &format!("/api/waiter/orders/{id}/status"),
                    &waiter,
                    serde_json::json!({ "status": status }),
                )
                .await;
            assert_eq!(res.status, StatusCode::OK, "{status}: {:?}", res.body);
        }
        let res = self
            .put(
                &format!("/api/kitchen/orders/{id}/status"),
                &self.cook(),
                serde_json::json!({"status": "ready"}),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "{:?}", res.body);
        let res = self
            .put(
                &format!("/api/waiter/orders/{id}/status"),
                &waiter,
                serde_json::json!({"status": "served"}),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "{:?}", res.body);
    }
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Money rendered as a JSON number
pub fn money(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap(),
        other => panic!("money must be a JSON number, got {other}"),
    }
}
