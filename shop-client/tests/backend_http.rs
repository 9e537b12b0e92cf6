// shop-client/tests/backend_http.rs
// Drives HttpClient against an in-process mock of the hosted backend

use axum::{
    Json, Router,
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use shared::models::{LineItem, MenuItem, Role, SaleRecord};
use shop_client::{ClientConfig, ClientError, HttpClient, ShopBackend};
use std::collections::HashMap;

const ANON_KEY: &str = "anon-test-key";
const USER_TOKEN: &str = "user-access-token";

fn has_api_key(headers: &HeaderMap) -> bool {
    headers.get("apikey").and_then(|v| v.to_str().ok()) == Some(ANON_KEY)
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn sales(headers: HeaderMap) -> impl IntoResponse {
    if !has_api_key(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "No API key found"})));
    }
    (
        StatusCode::OK,
        Json(json!([
            {
                "id": 1,
                "Details": [{"DrinkName": "Milk Tea", "quantity": 2}],
                "price": 9.00,
                "sale_date": "2024-03-01T10:00:00+00:00"
            },
            {"id": 2, "Details": "broken", "price": 3, "sale_date": "2024-03-01"},
            {"id": 3, "Details": [], "sale_date": "2024-03-02"}
        ])),
    )
}

async fn menu(headers: HeaderMap) -> impl IntoResponse {
    if bearer(&headers).as_deref() != Some(USER_TOKEN) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "JWT expired"})));
    }
    (
        StatusCode::OK,
        Json(json!([
            {"id": 10, "DrinkName": "milk tea", "description": "classic", "price": 4.5},
            {"id": 11, "DrinkName": "  ", "price": 3.0}
        ])),
    )
}

async fn insert_menu(headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    if headers.get("prefer").and_then(|v| v.to_str().ok()) != Some("return=representation") {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "missing Prefer"})));
    }
    let row = &body[0];
    if row["DrinkName"] == "Latte" {
        return (
            StatusCode::CONFLICT,
            Json(json!({"code": "23505", "message": "duplicate key value violates unique constraint"})),
        );
    }
    let mut stored = row.clone();
    stored["id"] = json!(42);
    (StatusCode::CREATED, Json(json!([stored])))
}

async fn insert_sale(Json(body): Json<Value>) -> impl IntoResponse {
    let mut stored = body[0].clone();
    stored["id"] = json!("sale-1");
    (StatusCode::CREATED, Json(json!([stored])))
}

async fn token(Json(body): Json<Value>) -> impl IntoResponse {
    if body["password"] != "secret" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid_grant", "error_description": "Invalid login credentials"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "access_token": USER_TOKEN,
            "token_type": "bearer",
            "refresh_token": "refresh",
            "user": {"id": "user-1", "email": body["email"]}
        })),
    )
}

async fn signup(Json(body): Json<Value>) -> impl IntoResponse {
    Json(json!({"user": {"id": "user-2", "email": body["email"]}, "session": null}))
}

async fn logout(headers: HeaderMap) -> StatusCode {
    match bearer(&headers).as_deref() {
        Some(USER_TOKEN) => StatusCode::NO_CONTENT,
        _ => StatusCode::UNAUTHORIZED,
    }
}

async fn profiles(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    match params.get("id").map(String::as_str) {
        Some("eq.user-1") => Json(json!([{"role": "admin"}])),
        _ => Json(json!([])),
    }
}

async fn spawn_backend() -> HttpClient {
    let app = Router::new()
        .route("/rest/v1/Sales", get(sales).post(insert_sale))
        .route("/rest/v1/Menu", get(menu).post(insert_menu))
        .route(
            "/rest/v1/profiles",
            get(profiles).post(|| async { StatusCode::CREATED }),
        )
        .route("/auth/v1/token", post(token))
        .route("/auth/v1/signup", post(signup))
        .route("/auth/v1/logout", post(logout));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    ClientConfig::new(format!("http://{}/", addr), ANON_KEY)
        .with_timeout(5)
        .build_http_client()
        .unwrap()
}

#[tokio::test]
async fn test_fetch_sales_decodes_and_reports_rejected_rows() {
    let client = spawn_backend().await;

    let decoded = client.fetch_sales(None).await.unwrap();
    assert_eq!(decoded.items.len(), 1);
    assert_eq!(decoded.rejected.len(), 2);
    assert_eq!(decoded.rejected[0].index, 1);
    assert_eq!(decoded.rejected[1].index, 2);

    let sale = &decoded.items[0];
    assert_eq!(sale.id.as_deref(), Some("1"));
    assert_eq!(sale.line_items, vec![LineItem::new("Milk Tea", 2)]);
    assert_eq!(sale.total_price, Decimal::new(900, 2));
    assert_eq!(sale.sale_date, "2024-03-01T10:00:00+00:00");
}

#[tokio::test]
async fn test_fetch_menu_uses_user_token() {
    let client = spawn_backend().await;

    let err = client.fetch_menu(None).await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));

    let decoded = client.fetch_menu(Some(USER_TOKEN)).await.unwrap();
    assert_eq!(decoded.items.len(), 1);
    assert_eq!(decoded.items[0].name, "milk tea");
    assert_eq!(decoded.items[0].unit_price, Decimal::new(45, 1));
    assert_eq!(decoded.rejected.len(), 1);
}

#[tokio::test]
async fn test_insert_menu_item_returns_stored_row() {
    let client = spawn_backend().await;

    let item = MenuItem::new("Taro Latte", Decimal::new(525, 2)).with_description("creamy");
    let stored = client.insert_menu_item(&item, Some(USER_TOKEN)).await.unwrap();
    assert_eq!(stored.id.as_deref(), Some("42"));
    assert_eq!(stored.name, "Taro Latte");
    assert_eq!(stored.unit_price, Decimal::new(525, 2));

    let duplicate = MenuItem::new("Latte", Decimal::new(400, 2)).with_description("x");
    let err = client
        .insert_menu_item(&duplicate, Some(USER_TOKEN))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Conflict(msg) if msg.contains("duplicate key")));
}

#[tokio::test]
async fn test_insert_sale_round_trips_details() {
    let client = spawn_backend().await;

    let sale = SaleRecord::new(
        vec![LineItem::new("Milk Tea", 1), LineItem::new("Latte", 2)],
        Decimal::new(1250, 2),
        "2024-03-05T09:30:00Z",
    );
    let stored = client.insert_sale(&sale, Some(USER_TOKEN)).await.unwrap();
    assert_eq!(stored.id.as_deref(), Some("sale-1"));
    assert_eq!(stored.line_items, sale.line_items);
    assert_eq!(stored.total_price, Decimal::new(1250, 2));
}

#[tokio::test]
async fn test_sign_in_and_sign_out() {
    let client = spawn_backend().await;

    let err = client.sign_in("a@b.c", "wrong").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(msg) if msg == "Invalid login credentials"));

    let session = client.sign_in("a@b.c", "secret").await.unwrap();
    assert_eq!(session.access_token, USER_TOKEN);
    assert_eq!(session.refresh_token.as_deref(), Some("refresh"));
    assert_eq!(session.user.id, "user-1");
    assert_eq!(session.user.email.as_deref(), Some("a@b.c"));

    client.sign_out(&session.access_token).await.unwrap();
    assert!(matches!(
        client.sign_out("stale").await.unwrap_err(),
        ClientError::Unauthorized
    ));
}

#[tokio::test]
async fn test_sign_up_unwraps_user() {
    let client = spawn_backend().await;

    let user = client.sign_up("new@shop.test", "pw123456").await.unwrap();
    assert_eq!(user.id, "user-2");
    assert_eq!(user.email.as_deref(), Some("new@shop.test"));
}

#[tokio::test]
async fn test_profile_role_lookup() {
    let client = spawn_backend().await;

    assert_eq!(
        client.fetch_role("user-1", Some(USER_TOKEN)).await.unwrap(),
        Some(Role::Admin)
    );
    assert_eq!(client.fetch_role("nobody", Some(USER_TOKEN)).await.unwrap(), None);

    client
        .create_profile("user-2", Role::User, Some(USER_TOKEN))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unreachable_backend_is_http_error() {
    let client = ClientConfig::new("http://127.0.0.1:9", ANON_KEY)
        .with_timeout(2)
        .build_http_client()
        .unwrap();
    let err = client.fetch_sales(None).await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}
