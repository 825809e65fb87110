use axum::{
    routing::{get, post},
    Router,
};

use crate::{controllers::transaction_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/api/transaction/update",
            post(transaction_controller::post_update),
        )
        .route(
            "/api/transactions",
            get(transaction_controller::get_transactions),
        )
}
