use axum::{routing::get, Router};

use crate::{controllers::realtime_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/orders/stream", get(realtime_controller::sse_orders))
        .route("/api/prices", get(realtime_controller::get_prices))
}
