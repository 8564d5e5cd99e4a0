use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, ADMIN_EMAIL, ADMIN_PASSWORD, CUSTOMER_EMAIL, CUSTOMER_PASSWORD};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<String> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(body.to_string()).unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<String> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(String::new()).unwrap()
}

/// Log in against `app` and return the issued token.
async fn token_for(app: &Router, email: &str, password: &str) -> String {
    let body = format!(r#"{{"email":"{email}","password":"{password}"}}"#);
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/api/auth/login", None, &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await["token"].as_str().unwrap().to_string()
}

// --- login ---

#[tokio::test]
async fn login_returns_token_and_user() {
    let body = format!(r#"{{"email":"{ADMIN_EMAIL}","password":"{ADMIN_PASSWORD}"}}"#);
    let resp = app()
        .oneshot(json_request("POST", "/api/auth/login", None, &body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert!(!json["token"].as_str().unwrap().is_empty());
    assert_eq!(json["usuario"]["nombre"], "Administrador");
    assert_eq!(json["usuario"]["rol"], "admin");
}

#[tokio::test]
async fn login_accepts_identificador() {
    let body = format!(r#"{{"identificador":"{ADMIN_EMAIL}","password":"{ADMIN_PASSWORD}"}}"#);
    let resp = app()
        .oneshot(json_request("POST", "/api/auth/login", None, &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_wrong_password_returns_401() {
    let body = format!(r#"{{"email":"{ADMIN_EMAIL}","password":"nope"}}"#);
    let resp = app()
        .oneshot(json_request("POST", "/api/auth/login", None, &body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(resp).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Usuario o contraseña incorrectos");
}

#[tokio::test]
async fn login_missing_password_returns_400() {
    let body = format!(r#"{{"email":"{ADMIN_EMAIL}"}}"#);
    let resp = app()
        .oneshot(json_request("POST", "/api/auth/login", None, &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- products ---

#[tokio::test]
async fn list_products_is_public_and_puts_out_of_stock_last() {
    let resp = app().oneshot(get_request("/api/productos", None)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    let products = json["productos"].as_array().unwrap();
    assert_eq!(products.len(), 4);
    assert_eq!(products.last().unwrap()["stock"], 0);
    assert_eq!(json["sinStock"], 1);
}

#[tokio::test]
async fn list_products_filters_by_category() {
    let resp = app()
        .oneshot(get_request("/api/productos?categoria=accesorios", None))
        .await
        .unwrap();

    let json = body_json(resp).await;
    let products = json["productos"].as_array().unwrap();
    assert_eq!(products.len(), 2);
    assert!(products.iter().all(|p| p["categoria"] == "accesorios"));
}

// --- orders ---

#[tokio::test]
async fn list_orders_requires_token() {
    let resp = app().oneshot(get_request("/api/ordenes", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn list_orders_rejects_unknown_token() {
    let resp = app().oneshot(get_request("/api/ordenes", Some("forged"))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn list_orders_requires_admin() {
    let app = app();
    let token = token_for(&app, CUSTOMER_EMAIL, CUSTOMER_PASSWORD).await;
    let resp = app.oneshot(get_request("/api/ordenes", Some(&token))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn list_orders_filters_by_status() {
    let app = app();
    let token = token_for(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let resp = app
        .oneshot(get_request("/api/ordenes?estado=entregado", Some(&token)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    let orders = json["ordenes"].as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert!(orders.iter().all(|o| o["estado"] == "entregado"));
}

// --- statistics ---

#[tokio::test]
async fn statistics_aggregate_seeded_orders() {
    let app = app();
    let token = token_for(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let resp = app
        .oneshot(get_request("/api/ordenes/admin/estadisticas", Some(&token)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    let stats = &json["estadisticas"];
    assert_eq!(stats["totalOrdenes"], 4);
    assert_eq!(stats["ordenesPendientes"], 1);
    assert_eq!(stats["ordenesEntregadas"], 2);
    assert_eq!(stats["ventasTotales"], 1973.5);
    assert_eq!(stats["ventasMensuales"], 1074.0);
}

// --- stock ---

#[tokio::test]
async fn update_stock_rejects_negative() {
    let app = app();
    let token = token_for(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let resp = app
        .oneshot(json_request("PATCH", "/api/productos/prod-1/stock", Some(&token), r#"{"stock":-1}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_stock_unknown_product_returns_404() {
    let app = app();
    let token = token_for(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let resp = app
        .oneshot(json_request("PATCH", "/api/productos/prod-99/stock", Some(&token), r#"{"stock":1}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_stock_then_list_reflects_change() {
    let app = app();
    let token = token_for(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let resp = app
        .clone()
        .oneshot(json_request("PATCH", "/api/productos/prod-4/stock", Some(&token), r#"{"stock":15}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["producto"]["stock"], 15);

    let resp = app.oneshot(get_request("/api/productos", None)).await.unwrap();
    let json = body_json(resp).await;
    let product = json["productos"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == "prod-4")
        .cloned()
        .unwrap();
    assert_eq!(product["stock"], 15);
    assert_eq!(json["sinStock"], 0);
}

// --- order status ---

#[tokio::test]
async fn update_order_status_rejects_unknown_value() {
    let app = app();
    let token = token_for(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let resp = app
        .oneshot(json_request("PATCH", "/api/ordenes/whatever/estado", Some(&token), r#"{"estado":"perdido"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_order_status_unknown_order_returns_404() {
    let app = app();
    let token = token_for(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let resp = app
        .oneshot(json_request("PATCH", "/api/ordenes/missing/estado", Some(&token), r#"{"estado":"enviado"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cancelling_an_order_restocks_its_items() {
    let app = app();
    let token = token_for(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let resp = app
        .clone()
        .oneshot(get_request("/api/ordenes?estado=pendiente", Some(&token)))
        .await
        .unwrap();
    let order_id = body_json(resp).await["ordenes"][0]["_id"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/ordenes/{order_id}/estado"),
            Some(&token),
            r#"{"estado":"cancelado"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["orden"]["estado"], "cancelado");

    // the pending order held one prod-1 and one prod-3
    let resp = app.oneshot(get_request("/api/productos", None)).await.unwrap();
    let json = body_json(resp).await;
    let stock_of = |id: &str| {
        json["productos"]
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["id"] == id)
            .map(|p| p["stock"].clone())
            .unwrap()
    };
    assert_eq!(stock_of("prod-1"), 6);
    assert_eq!(stock_of("prod-3"), 41);
}
