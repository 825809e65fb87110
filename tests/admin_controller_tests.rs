use axum::{
    http::{header, Request, StatusCode},
    routing::{get, post},
    Router,
};
use backoffice::models::{CurrentAdmin, Permissions};
use backoffice::{config, controllers::admin_controller, services, store, AppState};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn test_state() -> AppState {
    let mut settings = config::load();
    settings.root_admin_id = "root".to_string();
    settings.root_admin_password = "rootpass".to_string();

    let (events_tx, _events_rx) = tokio::sync::broadcast::channel::<String>(16);

    AppState {
        db: store::Db::new(),
        settings,
        prices: services::binance::PriceFeed::new(),
        events_tx,
    }
}

async fn seeded_state() -> AppState {
    let state = test_state();
    services::admin_service::ensure_root_admin(&state)
        .await
        .expect("seed root admin");
    state
}

async fn response_json(res: axum::response::Response) -> serde_json::Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<axum::body::Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap()
}

fn super_admin() -> CurrentAdmin {
    CurrentAdmin {
        id: "root".to_string(),
        is_super: true,
        permissions: Permissions::all(),
    }
}

fn limited_admin() -> CurrentAdmin {
    CurrentAdmin {
        id: "helper".to_string(),
        is_super: false,
        permissions: Permissions::all(),
    }
}

#[tokio::test]
async fn login_wrong_password_fails_without_token() {
    let state = seeded_state().await;
    let app = Router::new()
        .route("/api/admin/login", post(admin_controller::post_login))
        .with_state(state);

    let req = json_request(
        "/api/admin/login",
        serde_json::json!({ "id": "root", "password": "not-the-password" }),
    );

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = response_json(res).await;
    assert_eq!(body["ok"], false);
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn login_unknown_id_fails() {
    let state = seeded_state().await;
    let app = Router::new()
        .route("/api/admin/login", post(admin_controller::post_login))
        .with_state(state);

    let req = json_request(
        "/api/admin/login",
        serde_json::json!({ "id": "ghost", "password": "whatever" }),
    );

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_then_list_through_full_app() {
    let state = seeded_state().await;
    let app = backoffice::routes::app(state);

    let res = app
        .clone()
        .oneshot(json_request(
            "/api/admin/login",
            serde_json::json!({ "id": "root", "password": "rootpass" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_json(res).await;
    assert_eq!(body["ok"], true);
    let token = body["token"].as_str().expect("token issued").to_string();

    let req = Request::builder()
        .method("GET")
        .uri("/api/admin/list")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(axum::body::Body::empty())
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_json(res).await;
    assert_eq!(body["ok"], true);
    assert!(body["admins"]["root"]["isSuper"].as_bool().unwrap());
    // password hashes never leave the server
    assert!(body["admins"]["root"].get("passwordHash").is_none());
}

#[tokio::test]
async fn list_without_token_is_unauthorized() {
    let state = seeded_state().await;
    let app = backoffice::routes::app(state);

    let req = Request::builder()
        .method("GET")
        .uri("/api/admin/list")
        .body(axum::body::Body::empty())
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_by_non_super_is_denied_and_directory_unchanged() {
    let state = seeded_state().await;
    let app = Router::new()
        .route("/api/admin/create", post(admin_controller::post_create))
        .with_state(state.clone());

    let mut req = json_request(
        "/api/admin/create",
        serde_json::json!({ "id": "newbie", "password": "pw123456", "permissions": { "recharge": true } }),
    );
    req.extensions_mut().insert(limited_admin());

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    assert_eq!(state.db.admin_count().await, 1);
}

#[tokio::test]
async fn create_duplicate_id_conflicts() {
    let state = seeded_state().await;
    let app = Router::new()
        .route("/api/admin/create", post(admin_controller::post_create))
        .with_state(state);

    let mut req = json_request(
        "/api/admin/create",
        serde_json::json!({ "id": "root", "password": "pw123456", "permissions": {} }),
    );
    req.extensions_mut().insert(super_admin());

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn created_admin_can_login() {
    let state = seeded_state().await;
    let app = Router::new()
        .route("/api/admin/create", post(admin_controller::post_create))
        .route("/api/admin/login", post(admin_controller::post_login))
        .with_state(state);

    let mut req = json_request(
        "/api/admin/create",
        serde_json::json!({ "id": "ops", "password": "opspass", "permissions": { "recharge": true, "withdraw": true } }),
    );
    req.extensions_mut().insert(super_admin());

    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .oneshot(json_request(
            "/api/admin/login",
            serde_json::json!({ "id": "ops", "password": "opspass" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_json(res).await;
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn deleting_an_admin_revokes_its_token() {
    let state = seeded_state().await;
    let app = backoffice::routes::app(state);

    let res = app
        .clone()
        .oneshot(json_request(
            "/api/admin/login",
            serde_json::json!({ "id": "root", "password": "rootpass" }),
        ))
        .await
        .unwrap();
    let root_token = response_json(res).await["token"].as_str().unwrap().to_string();

    let req = Request::builder()
        .method("POST")
        .uri("/api/admin/create")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {root_token}"))
        .body(axum::body::Body::from(
            serde_json::json!({ "id": "temp", "password": "temppass", "permissions": {} }).to_string(),
        ))
        .unwrap();
    assert_eq!(app.clone().oneshot(req).await.unwrap().status(), StatusCode::OK);

    let res = app
        .clone()
        .oneshot(json_request(
            "/api/admin/login",
            serde_json::json!({ "id": "temp", "password": "temppass" }),
        ))
        .await
        .unwrap();
    let temp_token = response_json(res).await["token"].as_str().unwrap().to_string();

    let req = Request::builder()
        .method("POST")
        .uri("/api/admin/delete")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {root_token}"))
        .body(axum::body::Body::from(
            serde_json::json!({ "id": "temp" }).to_string(),
        ))
        .unwrap();
    assert_eq!(app.clone().oneshot(req).await.unwrap().status(), StatusCode::OK);

    // the deleted admin's still-valid JWT no longer resolves
    let req = Request::builder()
        .method("GET")
        .uri("/api/admin/list")
        .header(header::AUTHORIZATION, format!("Bearer {temp_token}"))
        .body(axum::body::Body::empty())
        .unwrap();
    assert_eq!(app.oneshot(req).await.unwrap().status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn delete_unknown_admin_is_not_found() {
    let state = seeded_state().await;
    let app = Router::new()
        .route("/api/admin/delete", post(admin_controller::post_delete))
        .with_state(state);

    let mut req = json_request("/api/admin/delete", serde_json::json!({ "id": "nobody" }));
    req.extensions_mut().insert(super_admin());

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_route_without_extension_is_unauthorized() {
    let state = seeded_state().await;
    let app = Router::new()
        .route("/api/admin/list", get(admin_controller::get_list))
        .with_state(state);

    let req = Request::builder()
        .method("GET")
        .uri("/api/admin/list")
        .body(axum::body::Body::empty())
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = response_json(res).await;
    assert_eq!(body["ok"], false);
}
