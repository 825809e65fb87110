use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{errors::ApiError, services::balance_service, AppState};

#[derive(Deserialize)]
pub struct BalanceQuery {
    #[serde(default)]
    pub userid: String,
}

// GET /api/balance?userid=
pub async fn get_balance(
    State(state): State<AppState>,
    Query(query): Query<BalanceQuery>,
) -> Result<Json<Value>, ApiError> {
    let balance = balance_service::get_balance(&state, &query.userid).await?;
    Ok(Json(json!({ "balance": balance })))
}

#[derive(Deserialize)]
pub struct SetBalanceBody {
    #[serde(default)]
    pub userid: String,
    #[serde(default)]
    pub balance: f64,
}

// POST /set-balance  (back-office add/deduct tool; legacy response shape)
pub async fn post_set_balance(
    State(state): State<AppState>,
    Json(body): Json<SetBalanceBody>,
) -> Result<Json<Value>, ApiError> {
    balance_service::set_balance(&state, &body.userid, body.balance).await?;
    Ok(Json(json!({ "success": true })))
}
