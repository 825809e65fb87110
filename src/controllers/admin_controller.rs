use axum::{
    extract::{Extension, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    auth,
    errors::ApiError,
    models::{CurrentAdmin, Permissions},
    services::admin_service,
    AppState,
};

#[derive(Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub password: String,
}

// POST /api/admin/login
pub async fn post_login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<Value>, ApiError> {
    if body.id.trim().is_empty() || body.password.is_empty() {
        return Err(ApiError::Validation("id and password are required".to_string()));
    }

    let token = admin_service::login(&state, body.id.trim(), &body.password).await?;
    Ok(Json(json!({ "ok": true, "token": token })))
}

// GET /api/admin/list
pub async fn get_list(
    State(state): State<AppState>,
    admin: Option<Extension<CurrentAdmin>>,
) -> Result<Json<Value>, ApiError> {
    auth::require_admin(admin)?;

    let admins = admin_service::list_admins(&state).await;
    Ok(Json(json!({ "ok": true, "admins": admins })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub permissions: Permissions,
    #[serde(default)]
    pub is_super: bool,
}

// POST /api/admin/create
pub async fn post_create(
    State(state): State<AppState>,
    admin: Option<Extension<CurrentAdmin>>,
    Json(body): Json<CreateBody>,
) -> Result<Json<Value>, ApiError> {
    let caller = auth::require_super(admin)?;

    admin_service::create_admin(
        &state,
        &caller,
        &body.id,
        &body.password,
        body.permissions,
        body.is_super,
    )
    .await?;

    Ok(Json(json!({ "ok": true })))
}

#[derive(Deserialize)]
pub struct DeleteBody {
    #[serde(default)]
    pub id: String,
}

// POST /api/admin/delete
pub async fn post_delete(
    State(state): State<AppState>,
    admin: Option<Extension<CurrentAdmin>>,
    Json(body): Json<DeleteBody>,
) -> Result<Json<Value>, ApiError> {
    let caller = auth::require_super(admin)?;

    admin_service::delete_admin(&state, &caller, body.id.trim()).await?;
    Ok(Json(json!({ "ok": true })))
}
