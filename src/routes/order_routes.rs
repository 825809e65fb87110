use axum::{routing::post, Router};

use crate::{controllers::order_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/api/order/:kind", post(order_controller::post_order))
}
