use axum::{
    routing::{get, post},
    Router,
};

use crate::{controllers::balance_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/balance", get(balance_controller::get_balance))
        .route("/set-balance", post(balance_controller::post_set_balance))
}
