//! Server-rendered catalog page and its dialog submissions.

mod common;

use std::sync::Arc;

use axum::http::{header, Request, StatusCode};
use axum::body::Body;
use axum::Router;
use serde_json::{json, Value};

use common::{app, app_with_store, body_string, form, get, json, send, DownStore};

async fn add_via_form(app: &Router, body: &str) -> axum::http::Response<Body> {
    send(app, form("/products", body)).await
}

async fn product_ids(app: &Router) -> Vec<String> {
    let body = body_string(send(app, get("/api/products")).await).await;
    let products: Vec<Value> = serde_json::from_str(&body).unwrap();
    products
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect()
}

const ROSE_FORM: &str =
    "name=Rosa&imageUrl=https%3A%2F%2Fexample.com%2Frosa.jpg&description=Flor+roja&price=1000&quantity=5";

#[tokio::test]
async fn empty_catalog_shows_no_products_message() {
    let response = send(&app(), get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("No products yet"));
    assert!(!html.contains("No products match"));
}

#[tokio::test]
async fn add_form_redirects_and_lists_product() {
    let app = app();
    let response = add_via_form(&app, ROSE_FORM).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let html = body_string(send(&app, get("/")).await).await;
    assert!(html.contains("<td>Rosa</td>"));
    assert!(html.contains("$\u{a0}1.000"));
    assert!(html.contains("src=\"https://example.com/rosa.jpg\""));
}

#[tokio::test]
async fn invalid_form_rerenders_dialog_with_input_kept() {
    let app = app();
    let response = add_via_form(
        &app,
        "name=Rosa&imageUrl=x&description=Flor+roja&price=abc&quantity=5",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let html = body_string(response).await;
    assert!(html.contains("Price must be a number greater than 0"));
    assert!(html.contains("value=\"abc\""));
    assert!(html.contains("Add product</h2>"));
    assert!(product_ids(&app).await.is_empty());
}

#[tokio::test]
async fn search_distinguishes_no_matches_from_no_products() {
    let app = app();
    add_via_form(&app, ROSE_FORM).await;
    add_via_form(
        &app,
        "name=Tulip%C3%A1n&imageUrl=x&description=Flor+amarilla&price=1500&quantity=2",
    )
    .await;

    let html = body_string(send(&app, get("/?q=flor")).await).await;
    assert!(html.contains("<td>Rosa</td>") && html.contains("<td>Tulipán</td>"));

    let html = body_string(send(&app, get("/?q=rosa")).await).await;
    assert!(html.contains("<td>Rosa</td>") && !html.contains("<td>Tulipán</td>"));

    let html = body_string(send(&app, get("/?q=xyz")).await).await;
    assert!(html.contains("No products match your search."));
    assert!(!html.contains("No products yet"));
}

#[tokio::test]
async fn long_description_is_truncated_in_table_but_not_in_details() {
    let app = app();
    let description = "d".repeat(60);
    let created = send(
        &app,
        json(
            "POST",
            "/api/products",
            json!({
                "name": "Rosa",
                "imageUrl": "",
                "description": description,
                "price": 1,
                "quantity": 1
            }),
        ),
    )
    .await;
    // Image URL is required.
    assert_eq!(created.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = format!("name=Rosa&imageUrl=x&description={description}&price=1&quantity=1");
    add_via_form(&app, &body).await;
    let id = product_ids(&app).await.remove(0);

    let table = body_string(send(&app, get("/")).await).await;
    assert!(table.contains(&format!("<td>{}...</td>", "d".repeat(50))));
    assert!(!table.contains(&description));

    let details = body_string(send(&app, get(&format!("/?overlay=view&id={id}"))).await).await;
    assert!(details.contains(&format!("<p class=\"description\">{description}</p>")));
    assert!(details.contains("1 units"));
}

#[tokio::test]
async fn edit_dialog_is_prefilled_and_updates_price() {
    let app = app();
    add_via_form(&app, ROSE_FORM).await;
    let id = product_ids(&app).await.remove(0);

    let html = body_string(send(&app, get(&format!("/?overlay=edit&id={id}"))).await).await;
    assert!(html.contains("Edit product</h2>"));
    assert!(html.contains("name=\"price\" value=\"1000\""));

    let body = ROSE_FORM.replace("price=1000", "price=2000");
    let response = send(&app, form(&format!("/products/{id}?q=ros"), &body)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/?q=ros");

    assert_eq!(product_ids(&app).await, vec![id]);
    let html = body_string(send(&app, get("/")).await).await;
    assert!(html.contains("$\u{a0}2.000"));
}

#[tokio::test]
async fn editing_deleted_product_keeps_dialog_open() {
    let app = app();
    let response = send(&app, form("/products/gone", ROSE_FORM)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_string(response).await;
    assert!(html.contains("This product no longer exists"));
}

#[tokio::test]
async fn delete_dialog_names_product_and_removes_it() {
    let app = app();
    add_via_form(&app, ROSE_FORM).await;
    let id = product_ids(&app).await.remove(0);

    let html = body_string(send(&app, get(&format!("/?overlay=delete&id={id}"))).await).await;
    assert!(html.contains("delete <strong>Rosa</strong>?"));

    let response = send(&app, form(&format!("/products/{id}/delete"), "name=Rosa")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(product_ids(&app).await.is_empty());

    // A second confirmation for the same id is not an error.
    let response = send(&app, form(&format!("/products/{id}/delete"), "name=Rosa")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn store_outage_shows_banner_with_retry() {
    let app = app_with_store(Arc::new(DownStore));
    let html = body_string(send(&app, get("/?q=flor")).await).await;
    assert!(html.contains("Could not load the products"));
    assert!(html.contains("href=\"/?q=flor\">Retry</a>"));
    assert!(!html.contains("No products yet"));
}

#[tokio::test]
async fn failed_delete_keeps_dialog_open_with_message() {
    let app = app_with_store(Arc::new(DownStore));
    let response = send(&app, form("/products/abc/delete", "name=Rosa")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let html = body_string(response).await;
    assert!(html.contains("Could not delete the product"));
    assert!(html.contains("<strong>Rosa</strong>"));
}

#[tokio::test]
async fn login_sets_session_cookie_and_toolbar_shows_user() {
    let app = app();
    let html = body_string(send(&app, get("/")).await).await;
    assert!(html.contains(">Sign in</a>"));

    let response = send(&app, form("/login", "email=admin%40example.com&password=pw")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));

    let token_pair = cookie.split(';').next().unwrap().to_string();
    let request = Request::builder()
        .uri("/")
        .header(header::COOKIE, token_pair)
        .body(Body::empty())
        .unwrap();
    let html = body_string(send(&app, request).await).await;
    assert!(html.contains("Josias Peguero"));
    assert!(html.contains(">JP<"));
    assert!(html.contains("Sign out"));

    let response = send(&app, form("/logout", "")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cleared = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
async fn login_with_blank_password_stays_in_dialog() {
    let response = send(&app(), form("/login", "email=admin%40example.com&password=")).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_string(response).await;
    assert!(html.contains("Email and password are required"));
    assert!(html.contains("value=\"admin@example.com\""));
}

#[tokio::test]
async fn tampered_session_cookie_is_ignored() {
    let request = Request::builder()
        .uri("/")
        .header(header::COOKIE, "session=not-a-token")
        .body(Body::empty())
        .unwrap();
    let html = body_string(send(&app(), request).await).await;
    assert!(html.contains(">Sign in</a>"));
}

#[tokio::test]
async fn edit_dialog_accepts_prices_with_many_decimals() {
    let app = app();
    send(
        &app,
        json(
            "POST",
            "/api/products",
            json!({
                "name": "Rosa",
                "imageUrl": "x",
                "description": "Flor roja",
                "price": 19.999,
                "quantity": 1
            }),
        ),
    )
    .await;
    let id = product_ids(&app).await.remove(0);

    let html = body_string(send(&app, get(&format!("/?overlay=edit&id={id}"))).await).await;
    assert!(html.contains("name=\"price\" value=\"19.999\" min=\"0\" step=\"any\""));
}
