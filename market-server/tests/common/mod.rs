//! Shared fixtures for router and workflow tests
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use market_server::api::build_app;
use market_server::db::{self, DbService};
use market_server::notify::{Notifier, RecordingSink};
use market_server::{AppState, Config};
use serde_json::Value;
use shared::models::{AddressCreate, ProductCreate, Role, UserStatus};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub state: AppState,
    pub app: Router,
    pub sink: Arc<RecordingSink>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_sink(RecordingSink::new()).await
    }

    /// Every notification attempt fails
    pub async fn failing_notifications() -> Self {
        Self::with_sink(RecordingSink::failing()).await
    }

    /// File-backed database with a real connection pool
    pub async fn on_disk(dir: &std::path::Path) -> Self {
        let url = format!("sqlite://{}", dir.join("market.db").display());
        let db = DbService::new(&url).await.expect("file database");
        Self::with_db(db, RecordingSink::new())
    }

    async fn with_sink(sink: RecordingSink) -> Self {
        let db = DbService::in_memory().await.expect("in-memory database");
        Self::with_db(db, sink)
    }

    fn with_db(db: DbService, sink: RecordingSink) -> Self {
        let config = Config {
            jwt_secret: "integration-test-secret".into(),
            login_rate_limit: 0,
            register_rate_limit: 0,
            seed_demo_data: false,
            ..Config::default()
        };
        let sink = Arc::new(sink);
        let state = AppState::with_parts(config, db.pool, Notifier::recording(sink.clone()));
        let app = build_app(state.clone());
        Self { state, app, sink }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.state.pool
    }

    pub fn token(&self, user_id: i64, username: &str, role: Role) -> String {
        self.state
            .jwt
            .generate_token(user_id, username, role)
            .expect("token")
    }

    /// Send a request through the full middleware stack
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, json)
    }
}

/// One retailer with stock, one customer with an address
pub struct Shop {
    pub retailer_user_id: i64,
    pub retailer_id: i64,
    pub customer_id: i64,
    pub address_id: i64,
    pub apples_id: i64,
    pub bananas_id: i64,
}

pub async fn create_user(pool: &SqlitePool, username: &str, role: Role, status: UserStatus) -> i64 {
    db::users::create(
        pool,
        username,
        &format!("{username}@example.com"),
        "not-a-real-hash",
        role,
        status,
        0,
    )
    .await
    .expect("user")
}

pub async fn create_product(pool: &SqlitePool, retailer_id: i64, name: &str, price: f64, quantity: i64) -> i64 {
    db::products::create(
        pool,
        &ProductCreate {
            retailer_id,
            name: name.into(),
            price: Some(price),
            quantity,
            category: Some("Fruits".into()),
        },
    )
    .await
    .expect("product")
}

pub async fn create_address(pool: &SqlitePool, user_id: i64) -> i64 {
    db::addresses::create(
        pool,
        &AddressCreate {
            user_id,
            address_line1: "12 Gandhi Road".into(),
            address_line2: None,
            city: "Vellore".into(),
            state: "Tamil Nadu".into(),
            pincode: "632001".into(),
            is_default: true,
        },
    )
    .await
    .expect("address")
}

/// FreshMart in Vellore: Apples 150 @ 95, Bananas 200 @ 45
pub async fn freshmart_vellore(pool: &SqlitePool) -> Shop {
    let retailer_user_id = create_user(pool, "freshmart_vellore", Role::Retailer, UserStatus::Active).await;
    let retailer_id = db::retailers::create(pool, retailer_user_id, "FreshMart", "Vellore", true)
        .await
        .expect("retailer");
    let apples_id = create_product(pool, retailer_id, "Apples", 95.0, 150).await;
    let bananas_id = create_product(pool, retailer_id, "Bananas", 45.0, 200).await;
    let customer_id = create_user(pool, "asha", Role::Customer, UserStatus::Active).await;
    let address_id = create_address(pool, customer_id).await;
    Shop {
        retailer_user_id,
        retailer_id,
        customer_id,
        address_id,
        apples_id,
        bananas_id,
    }
}

pub async fn stock(pool: &SqlitePool, product_id: i64) -> i64 {
    db::products::find_by_id(pool, product_id)
        .await
        .expect("query")
        .expect("product exists")
        .quantity
}

pub async fn order_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await
        .expect("count")
}
