//! Router-level tests: authentication, role gateways and ownership

mod common;

use common::{TestApp, create_user, freshmart_vellore, stock};
use http::StatusCode;
use serde_json::{Value, json};
use shared::models::{Role, UserStatus};

fn code(body: &Value) -> u64 {
    body["code"].as_u64().unwrap_or_default()
}

#[tokio::test]
async fn test_health_and_banner() {
    let t = TestApp::new().await;

    let (status, body) = t.send("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "ok");

    let (status, body) = t.send("GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["msg"].as_str().unwrap().contains("running"));
}

#[tokio::test]
async fn test_missing_and_bad_tokens() {
    let t = TestApp::new().await;

    let (status, body) = t.send("GET", "/api/orders/user/1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(code(&body), 1001);

    let (status, body) = t
        .send("GET", "/api/orders/user/1", Some("not.a.token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(code(&body), 1004);

    let (status, _) = t.send("GET", "/admin/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_gateways() {
    let t = TestApp::new().await;
    let shop = freshmart_vellore(t.pool()).await;
    let customer = t.token(shop.customer_id, "asha", Role::Customer);
    let retailer = t.token(shop.retailer_user_id, "freshmart_vellore", Role::Retailer);
    let admin_id = create_user(t.pool(), "root", Role::Admin, UserStatus::Active).await;
    let admin = t.token(admin_id, "root", Role::Admin);
    let inventory = format!("/retailer/inventory/{}", shop.retailer_id);

    let (status, body) = t.send("GET", &inventory, Some(&customer), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(code(&body), 2002);

    let (status, body) = t.send("GET", "/admin/users", Some(&retailer), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(code(&body), 2003);

    let (status, body) = t.send("GET", &inventory, Some(&retailer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    // Admins pass every gateway
    let (status, _) = t.send("GET", &inventory, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = t.send("GET", "/admin/users", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
    let uri = format!("/api/addresses/user/{}", shop.customer_id);
    let (status, _) = t.send("GET", &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_ownership_checks() {
    let t = TestApp::new().await;
    let shop = freshmart_vellore(t.pool()).await;
    let other_customer = create_user(t.pool(), "ravi", Role::Customer, UserStatus::Active).await;
    let ravi = t.token(other_customer, "ravi", Role::Customer);
    let other_retailer = create_user(t.pool(), "quickcart", Role::Retailer, UserStatus::Active).await;
    let quickcart = t.token(other_retailer, "quickcart", Role::Retailer);

    let uri = format!("/api/orders/user/{}", shop.customer_id);
    let (status, body) = t.send("GET", &uri, Some(&ravi), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(code(&body), 2001);

    let uri = format!("/retailer/inventory/{}", shop.retailer_id);
    let (status, body) = t.send("GET", &uri, Some(&quickcart), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(code(&body), 2001);

    // Ordering on someone else's behalf
    let order = json!({
        "customer_id": shop.customer_id,
        "retailer_id": shop.retailer_id,
        "address_id": shop.address_id,
        "order_items": [{"product_id": shop.apples_id, "quantity": 1}]
    });
    let (status, _) = t.send("POST", "/api/orders/", Some(&ravi), Some(order)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(stock(t.pool(), shop.apples_id).await, 150);
}

#[tokio::test]
async fn test_order_over_http() {
    let t = TestApp::new().await;
    let shop = freshmart_vellore(t.pool()).await;
    let customer = t.token(shop.customer_id, "asha", Role::Customer);
    let retailer = t.token(shop.retailer_user_id, "freshmart_vellore", Role::Retailer);

    let order = json!({
        "customer_id": shop.customer_id,
        "retailer_id": shop.retailer_id,
        "address_id": shop.address_id,
        "order_items": [{"product_id": shop.apples_id, "quantity": 10, "price": 95.0}]
    });
    let (status, body) = t.send("POST", "/api/orders/", Some(&customer), Some(order)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order created successfully and inventory updated");
    assert_eq!(body["order"]["total_price"], 950.0);
    assert_eq!(body["order"]["status"], "placed");
    assert!(body["order"]["order_number"].as_str().unwrap().starts_with("ORD-"));
    let order_id = body["order"]["id"].as_i64().unwrap();

    let too_many = json!({
        "customer_id": shop.customer_id,
        "retailer_id": shop.retailer_id,
        "address_id": shop.address_id,
        "order_items": [{"product_id": shop.apples_id, "quantity": 200}]
    });
    let (status, body) = t.send("POST", "/api/orders", Some(&customer), Some(too_many)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), 6003);
    assert_eq!(stock(t.pool(), shop.apples_id).await, 140);

    // Both parties can read it
    let uri = format!("/api/orders/{order_id}");
    let (status, _) = t.send("GET", &uri, Some(&customer), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = t.send("GET", &uri, Some(&retailer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["product_name"], "Apples");

    let uri = format!("/api/orders/retailer/{}", shop.retailer_id);
    let (status, body) = t.send("GET", &uri, Some(&retailer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Dispatch before confirmation is not allowed
    let dispatch = format!("/retailer/order/{order_id}/dispatch");
    let (status, body) = t.send("PUT", &dispatch, Some(&retailer), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(code(&body), 4008);

    let status_uri = format!("/api/orders/{order_id}/status");
    let (status, body) = t
        .send("PUT", &status_uri, Some(&retailer), Some(json!({"status": "bogus"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), 4009);

    let (status, body) = t
        .send("PUT", &status_uri, Some(&retailer), Some(json!({"status": "confirmed"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "confirmed");

    let (status, body) = t.send("PUT", &dispatch, Some(&retailer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "dispatched");

    let deliver = format!("/retailer/order/{order_id}/deliver");
    let (status, body) = t.send("PUT", &deliver, Some(&retailer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "delivered");
    assert!(body["delivery_timestamp"].is_i64());

    let payment = format!("/api/orders/{order_id}/payment");
    let (status, body) = t
        .send("PUT", &payment, Some(&retailer), Some(json!({"payment_status": "paid"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payment_status"], "paid");

    let (status, body) = t
        .send("PUT", &payment, Some(&retailer), Some(json!({"payment_status": "refunded-ish"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), 4010);
}

#[tokio::test]
async fn test_admin_approves_order() {
    let t = TestApp::new().await;
    let shop = freshmart_vellore(t.pool()).await;
    let customer = t.token(shop.customer_id, "asha", Role::Customer);
    let admin_id = create_user(t.pool(), "root", Role::Admin, UserStatus::Active).await;
    let admin = t.token(admin_id, "root", Role::Admin);

    let order = json!({
        "customer_id": shop.customer_id,
        "retailer_id": shop.retailer_id,
        "address_id": shop.address_id,
        "order_items": [{"product_id": shop.bananas_id, "quantity": 3}]
    });
    let (_, body) = t.send("POST", "/api/orders/", Some(&customer), Some(order)).await;
    let order_id = body["order"]["id"].as_i64().unwrap();

    let uri = format!("/admin/orders/{order_id}/approve");
    let (status, body) = t.send("POST", &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "confirmed");

    let (status, body) = t.send("POST", &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(code(&body), 4008);

    let (status, body) = t.send("GET", "/admin/orders", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["customer_username"], "asha");
}

#[tokio::test]
async fn test_catalog_browsing() {
    let t = TestApp::new().await;
    let shop = freshmart_vellore(t.pool()).await;
    let empty_user = create_user(t.pool(), "emptyshop", Role::Retailer, UserStatus::Active).await;
    let empty = market_server::db::retailers::create(t.pool(), empty_user, "EmptyShop", "Chennai", false)
        .await
        .unwrap();

    let (status, body) = t.send("GET", "/customer/cities", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["Chennai", "Vellore"]));

    let (status, body) = t.send("GET", "/customer/retailers/Vellore", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "FreshMart");

    let uri = format!("/customer/products/{}", shop.retailer_id);
    let (status, body) = t.send("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let uri = format!("/customer/products/{empty}");
    let (status, body) = t.send("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code(&body), 6001);

    let (status, body) = t.send("GET", "/api/products", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_customer_registration_and_login() {
    let t = TestApp::new().await;
    let register = json!({"username": "meera", "email": "meera@example.com", "password": "secret-pass"});

    let (status, body) = t
        .send("POST", "/customer/register", None, Some(register.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);
    let user_id = body["user_id"].as_i64().unwrap();

    let (status, body) = t.send("POST", "/customer/register", None, Some(register)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(code(&body), 3002);

    let short = json!({"username": "kiran", "email": "kiran@example.com", "password": "short"});
    let (status, body) = t.send("POST", "/customer/register", None, Some(short)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), 3004);

    let (status, body) = t
        .send(
            "POST",
            "/customer/login",
            None,
            Some(json!({"username": "meera", "password": "wrong-pass"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(code(&body), 1002);

    let (status, body) = t
        .send(
            "POST",
            "/customer/login",
            None,
            Some(json!({"username": "meera", "password": "secret-pass"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], user_id);
    assert_eq!(body["role"], "customer");
    let token = body["token"].as_str().unwrap().to_string();

    // The issued token works on the customer gateway
    let uri = format!("/api/addresses/user/{user_id}");
    let (status, body) = t.send("GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code(&body), 3201);

    let address = json!({
        "user_id": user_id,
        "address_line1": "4 Lake View",
        "city": "Chennai",
        "state": "Tamil Nadu",
        "pincode": "600001"
    });
    let (status, _) = t.send("POST", "/api/addresses/", Some(&token), Some(address)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = t.send("GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["city"], "Chennai");

    // Customer credentials do not open the retailer door
    let (status, _) = t
        .send(
            "POST",
            "/retailer/login",
            None,
            Some(json!({"username": "meera", "password": "secret-pass"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_retailer_review_flow() {
    let t = TestApp::new().await;
    let admin_id = create_user(t.pool(), "root", Role::Admin, UserStatus::Active).await;
    let admin = t.token(admin_id, "root", Role::Admin);
    let login = json!({"username": "greenleaf", "password": "leafy-greens"});

    let (status, body) = t
        .send(
            "POST",
            "/retailer/register",
            None,
            Some(json!({
                "username": "greenleaf",
                "email": "greenleaf@example.com",
                "password": "leafy-greens",
                "name": "GreenLeaf",
                "location": "Vellore"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let retailer_id = body["retailer_id"].as_i64().unwrap();

    let (status, body) = t.send("POST", "/retailer/login", None, Some(login.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(code(&body), 1007);

    let (status, body) = t.send("GET", "/admin/pending-retailers", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], retailer_id);

    let approve = format!("/admin/approve-retailer/{retailer_id}");
    let (status, body) = t.send("POST", &approve, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");
    assert_eq!(t.sink.emails().last().unwrap().to, "greenleaf@example.com");

    let (status, body) = t.send("POST", &approve, Some(&admin), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(code(&body), 3102);

    let reject = format!("/admin/reject-retailer/{retailer_id}");
    let (status, _) = t.send("POST", &reject, Some(&admin), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = t.send("POST", "/retailer/login", None, Some(login.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["retailer_id"], retailer_id);
    assert_eq!(body["role"], "retailer");

    let block = format!("/admin/block-retailer/{retailer_id}");
    let (status, body) = t.send("POST", &block, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_blocked"], true);
    let (status, _) = t.send("POST", &block, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = t.send("POST", "/retailer/login", None, Some(login)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(code(&body), 1007);

    let (status, body) = t.send("POST", "/admin/approve-retailer/999", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code(&body), 3101);
}

#[tokio::test]
async fn test_retailer_inventory_update_over_http() {
    let t = TestApp::new().await;
    let shop = freshmart_vellore(t.pool()).await;
    let retailer = t.token(shop.retailer_user_id, "freshmart_vellore", Role::Retailer);

    let (status, body) = t
        .send(
            "PUT",
            "/retailer/inventory/update",
            Some(&retailer),
            Some(json!({"retailer_id": shop.retailer_id, "product_name": "Apples", "new_qty": 500})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity"], 500);
    assert_eq!(stock(t.pool(), shop.apples_id).await, 500);

    let (status, _) = t
        .send(
            "PUT",
            "/retailer/inventory/update",
            Some(&retailer),
            Some(json!({"retailer_id": shop.retailer_id, "product_name": "Apples", "new_qty": -1})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = t
        .send(
            "POST",
            &format!("/api/copilot/summary?retailer_id={}", shop.retailer_id),
            Some(&retailer),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["summary"].as_str().unwrap().contains("2 products (700 units)"));
    assert!(body["suggestions"].is_array());
}

#[tokio::test]
async fn test_retailer_notifications() {
    let t = TestApp::new().await;
    let shop = freshmart_vellore(t.pool()).await;
    let customer = t.token(shop.customer_id, "asha", Role::Customer);
    let retailer = t.token(shop.retailer_user_id, "freshmart_vellore", Role::Retailer);

    let order = json!({
        "customer_id": shop.customer_id,
        "retailer_id": shop.retailer_id,
        "address_id": shop.address_id,
        "order_items": [{"product_id": shop.apples_id, "quantity": 2}]
    });
    let (status, _) = t.send("POST", "/api/orders/", Some(&customer), Some(order)).await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/api/notifications/retailer/{}", shop.retailer_id);
    let (status, body) = t.send("GET", &uri, Some(&retailer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["is_read"], false);
    let id = body[0]["id"].as_i64().unwrap();

    let (status, body) = t
        .send("PUT", &format!("/api/notifications/{id}/read"), Some(&retailer), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_read"], true);

    let (status, body) = t
        .send("PUT", "/api/notifications/999/read", Some(&retailer), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code(&body), 3301);
}
