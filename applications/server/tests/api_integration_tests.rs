/// API integration tests
/// Tests complete HTTP request/response cycles with real database
mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use common::{create_test_database, TEST_SECRET};
use ebazar_core::{NewUser, Product, ProductId, Role, Store};
use ebazar_server::{api, services::TokenService, state::AppState};
use ebazar_storage::Database;
use std::sync::Arc;
use tower::util::ServiceExt;

async fn create_test_app() -> (Router, Arc<Database>, Arc<TokenService>) {
    let db = create_test_database().await;
    let tokens = Arc::new(TokenService::new(TEST_SECRET.to_string(), 1));

    let app = api::router(AppState::new(db.clone(), Arc::clone(&tokens)));

    (app, db, tokens)
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn post(uri: &str, token: Option<&str>, body: &serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn delete(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).method("DELETE");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// The exact body every authorization failure must carry
fn unauthorized_body() -> serde_json::Value {
    serde_json::json!({"error": true, "message": "unauthorized access"})
}

async fn seed_products(db: &Database, count: usize) {
    for i in 1..=count {
        db.create_product(Product {
            id: ProductId::new(format!("p{i}")),
            name: format!("Product {i}"),
            price: i as f64,
            category: None,
            description: None,
            image_url: None,
        })
        .await
        .unwrap();
    }
}

async fn create_admin(db: &Database, email: &str) {
    db.create_user(NewUser {
        email: email.to_string(),
        name: "Admin".to_string(),
        role: Role::Admin,
    })
    .await
    .unwrap();
}

// ============================================================================
// Public routes
// ============================================================================

#[tokio::test]
async fn liveness_probe_answers_without_auth() {
    let (app, _, _) = create_test_app().await;

    let response = app.oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"E-Bazar server is running");
}

#[tokio::test]
async fn issued_token_opens_gated_routes() {
    let (app, _, _) = create_test_app().await;

    let response = app
        .clone()
        .oneshot(post(
            "/jwt",
            None,
            &serde_json::json!({"email": "a@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let token = body["token"].as_str().unwrap();

    let response = app
        .oneshot(get("/cart?email=a@example.com", Some(token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn registration_is_idempotent() {
    let (app, db, _) = create_test_app().await;

    let body = serde_json::json!({"email": "a@example.com", "name": "Alice"});

    let response = app
        .clone()
        .oneshot(post("/adduser", None, &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["email"], "a@example.com");
    assert_eq!(created["role"], "customer");

    // Second registration acknowledges instead of erroring
    let response = app.oneshot(post("/adduser", None, &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let repeat = body_json(response).await;
    assert_eq!(repeat, serde_json::json!({"message": "user already exists"}));

    // And never duplicates the record
    let user = db.find_user("a@example.com").await.unwrap().unwrap();
    assert_eq!(user.name, "Alice");
}

#[tokio::test]
async fn product_listing_pages_through_the_catalog() {
    let (app, db, _) = create_test_app().await;
    seed_products(&db, 12).await;

    let response = app
        .clone()
        .oneshot(get("/products?page=2&limit=5", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_json(response).await;
    let names: Vec<&str> = page
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["Product 6", "Product 7", "Product 8", "Product 9", "Product 10"]
    );

    // Page past the end is empty, not an error
    let response = app
        .clone()
        .oneshot(get("/products?page=9&limit=5", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));

    // Defaults: page 1, limit 10
    let response = app.clone().oneshot(get("/products", None)).await.unwrap();
    let default_page = body_json(response).await;
    assert_eq!(default_page.as_array().unwrap().len(), 10);

    let response = app.oneshot(get("/totalProducts", None)).await.unwrap();
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"totalProducts": 12})
    );
}

#[tokio::test]
async fn unknown_product_is_json_null() {
    let (app, db, _) = create_test_app().await;
    seed_products(&db, 1).await;

    let response = app.clone().oneshot(get("/product/p1", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Product 1");

    let response = app.oneshot(get("/product/nope", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::Value::Null);
}

// ============================================================================
// Authorization gate
// ============================================================================

#[tokio::test]
async fn missing_credential_is_rejected_with_uniform_body() {
    let (app, _, _) = create_test_app().await;

    let response = app
        .oneshot(get("/cart?email=a@example.com", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, unauthorized_body());
}

#[tokio::test]
async fn malformed_and_wrongly_prefixed_credentials_are_rejected() {
    let (app, _, tokens) = create_test_app().await;
    let token = tokens.issue("a@example.com").unwrap();

    // Garbage token
    let response = app
        .clone()
        .oneshot(get("/cart?email=a@example.com", Some("not-a-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, unauthorized_body());

    // Valid token, wrong scheme prefix
    let request = Request::builder()
        .uri("/cart?email=a@example.com")
        .header(header::AUTHORIZATION, format!("Token {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, unauthorized_body());
}

#[tokio::test]
async fn owner_mismatch_is_indistinguishable_from_no_credential() {
    let (app, _, tokens) = create_test_app().await;
    let token = tokens.issue("a@example.com").unwrap();

    let response = app
        .clone()
        .oneshot(get("/cart?email=b@example.com", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, unauthorized_body());

    let response = app
        .oneshot(get("/orders/b@example.com", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, unauthorized_body());
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn cart_flow_add_list_remove() {
    let (app, _, tokens) = create_test_app().await;
    let token = tokens.issue("a@example.com").unwrap();

    let response = app
        .clone()
        .oneshot(post(
            "/addtocart",
            Some(&token),
            &serde_json::json!({
                "productId": "p1",
                "productName": "Product 1",
                "price": 9.99,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let item = body_json(response).await;
    assert_eq!(item["email"], "a@example.com");
    let item_id = item["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(get("/cart?email=a@example.com", Some(&token)))
        .await
        .unwrap();
    let cart = body_json(response).await;
    assert_eq!(cart.as_array().unwrap().len(), 1);
    assert_eq!(cart[0]["productName"], "Product 1");

    let response = app
        .clone()
        .oneshot(delete(&format!("/cart/{item_id}"), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!({"success": true}));

    // Deleting the same entry again reports failure without erroring
    let response = app
        .oneshot(delete(&format!("/cart/{item_id}"), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"success": false})
    );
}

#[tokio::test]
async fn cart_entries_of_other_users_cannot_be_removed() {
    let (app, _, tokens) = create_test_app().await;
    let owner = tokens.issue("a@example.com").unwrap();
    let intruder = tokens.issue("b@example.com").unwrap();

    let response = app
        .clone()
        .oneshot(post(
            "/addtocart",
            Some(&owner),
            &serde_json::json!({
                "productId": "p1",
                "productName": "Product 1",
                "price": 9.99,
            }),
        ))
        .await
        .unwrap();
    let item_id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(delete(&format!("/cart/{item_id}"), Some(&intruder)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, unauthorized_body());

    // The entry is still there for its owner
    let response = app
        .oneshot(get("/cart?email=a@example.com", Some(&owner)))
        .await
        .unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}

// ============================================================================
// Checkout and orders
// ============================================================================

#[tokio::test]
async fn checkout_converts_cart_entry_into_paid_order() {
    let (app, _, tokens) = create_test_app().await;
    let token = tokens.issue("a@example.com").unwrap();

    let response = app
        .clone()
        .oneshot(post(
            "/addtocart",
            Some(&token),
            &serde_json::json!({
                "productId": "p1",
                "productName": "Product 1",
                "price": 9.99,
            }),
        ))
        .await
        .unwrap();
    let item_id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(post(
            "/checkout",
            Some(&token),
            &serde_json::json!({"cartItemId": item_id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let order = body_json(response).await;
    assert_eq!(order["status"], "paid");
    assert_eq!(order["productId"], "p1");
    assert_eq!(order["email"], "a@example.com");

    // The cart entry is gone
    let response = app
        .clone()
        .oneshot(get("/cart?email=a@example.com", Some(&token)))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, serde_json::json!([]));

    // And the order shows up in the history
    let response = app
        .oneshot(get("/orders/a@example.com", Some(&token)))
        .await
        .unwrap();
    let orders = body_json(response).await;
    assert_eq!(orders.as_array().unwrap().len(), 1);
    assert_eq!(orders[0]["productName"], "Product 1");
}

#[tokio::test]
async fn checkout_of_unknown_cart_entry_is_not_found() {
    let (app, _, tokens) = create_test_app().await;
    let token = tokens.issue("a@example.com").unwrap();

    let response = app
        .oneshot(post(
            "/checkout",
            Some(&token),
            &serde_json::json!({"cartItemId": "nope"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn checkout_of_someone_elses_cart_entry_is_rejected() {
    let (app, _, tokens) = create_test_app().await;
    let owner = tokens.issue("a@example.com").unwrap();
    let intruder = tokens.issue("b@example.com").unwrap();

    let response = app
        .clone()
        .oneshot(post(
            "/addtocart",
            Some(&owner),
            &serde_json::json!({
                "productId": "p1",
                "productName": "Product 1",
                "price": 9.99,
            }),
        ))
        .await
        .unwrap();
    let item_id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(post(
            "/checkout",
            Some(&intruder),
            &serde_json::json!({"cartItemId": item_id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, unauthorized_body());
}

// ============================================================================
// Admin routes
// ============================================================================

#[tokio::test]
async fn admin_routes_reject_customers_and_unknown_subjects() {
    let (app, db, tokens) = create_test_app().await;

    db.create_user(NewUser {
        email: "c@example.com".to_string(),
        name: "Customer".to_string(),
        role: Role::Customer,
    })
    .await
    .unwrap();

    // A registered customer is not an admin
    let customer = tokens.issue("c@example.com").unwrap();
    let response = app
        .clone()
        .oneshot(get("/allorders", Some(&customer)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, unauthorized_body());

    // A valid token for an email with no account at all
    let ghost = tokens.issue("ghost@example.com").unwrap();
    let response = app
        .clone()
        .oneshot(get("/customers", Some(&ghost)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, unauthorized_body());

    // No credential at all
    let response = app.oneshot(get("/allorders", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, unauthorized_body());
}

#[tokio::test]
async fn admin_sees_all_orders_and_customers() {
    let (app, db, tokens) = create_test_app().await;
    create_admin(&db, "admin@example.com").await;

    db.create_user(NewUser {
        email: "c@example.com".to_string(),
        name: "Customer".to_string(),
        role: Role::Customer,
    })
    .await
    .unwrap();

    let customer = tokens.issue("c@example.com").unwrap();
    let admin = tokens.issue("admin@example.com").unwrap();

    // Customer checks out one item
    let response = app
        .clone()
        .oneshot(post(
            "/addtocart",
            Some(&customer),
            &serde_json::json!({
                "productId": "p1",
                "productName": "Product 1",
                "price": 9.99,
            }),
        ))
        .await
        .unwrap();
    let item_id = body_json(response).await["id"].as_str().unwrap().to_string();
    app.clone()
        .oneshot(post(
            "/checkout",
            Some(&customer),
            &serde_json::json!({"cartItemId": item_id}),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(get("/allorders", Some(&admin)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let orders = body_json(response).await;
    assert_eq!(orders.as_array().unwrap().len(), 1);
    assert_eq!(orders[0]["email"], "c@example.com");

    // Customer listing excludes the admin account itself
    let response = app.oneshot(get("/customers", Some(&admin))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let customers = body_json(response).await;
    assert_eq!(customers.as_array().unwrap().len(), 1);
    assert_eq!(customers[0]["email"], "c@example.com");
}
