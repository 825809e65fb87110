use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::{Json, Router};
use serde_json::json;
use tower_http::services::ServeDir;

use crate::AppState;

pub mod admin_routes;
pub mod balance_routes;
pub mod order_routes;
pub mod realtime_routes;
pub mod transaction_routes;

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "ok": false, "error": "not found" })),
    )
}

pub fn app(state: AppState) -> Router {
    let router = Router::<AppState>::new();

    let router = admin_routes::add_routes(router);
    let router = order_routes::add_routes(router);
    let router = transaction_routes::add_routes(router);
    let router = balance_routes::add_routes(router);
    let router = realtime_routes::add_routes(router);

    router
        .nest_service("/static", ServeDir::new("static"))
        .fallback(not_found)
        .layer(from_fn_with_state(
            state.clone(),
            crate::auth::inject_current_admin,
        ))
        .with_state(state)
}
