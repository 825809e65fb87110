use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    errors::ApiError,
    models::OrderKind,
    services::order_service::{self, NewOrder},
    AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBody {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub coin: Option<String>,
    #[serde(default)]
    pub wallet: Option<String>,
}

fn client_ip(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get("x-forwarded-for")?.to_str().ok()?;
    let first = raw.split(',').next()?.trim();
    if first.is_empty() {
        return None;
    }
    Some(first.to_string())
}

// POST /api/order/:kind  (recharge | withdraw | buysell)
pub async fn post_order(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    headers: HeaderMap,
    Json(body): Json<SubmitBody>,
) -> Result<Json<Value>, ApiError> {
    let kind = OrderKind::parse(&kind)
        .ok_or_else(|| ApiError::Validation(format!("unknown order type '{kind}'")))?;

    let order_id = order_service::create_order(
        &state,
        NewOrder {
            kind,
            user_id: body.user_id,
            amount: body.amount,
            coin: body.coin,
            wallet: body.wallet,
            ip: client_ip(&headers),
        },
    )
    .await?;

    Ok(Json(json!({ "ok": true, "orderId": order_id })))
}
