use axum::{
    routing::{get, post},
    Router,
};

use crate::{controllers::admin_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/admin/login", post(admin_controller::post_login))
        .route("/api/admin/list", get(admin_controller::get_list))
        .route("/api/admin/create", post(admin_controller::post_create))
        .route("/api/admin/delete", post(admin_controller::post_delete))
}
