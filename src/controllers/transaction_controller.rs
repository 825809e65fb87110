use axum::{
    extract::{Extension, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    auth,
    errors::ApiError,
    models::{CurrentAdmin, Order, OrderKind, OrderStatus},
    services::order_service,
    AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBody {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub note: Option<String>,
}

// POST /api/transaction/update
pub async fn post_update(
    State(state): State<AppState>,
    admin: Option<Extension<CurrentAdmin>>,
    Json(body): Json<UpdateBody>,
) -> Result<Json<Value>, ApiError> {
    let caller = auth::require_admin(admin)?;

    let kind = OrderKind::parse(&body.kind)
        .ok_or_else(|| ApiError::Validation(format!("unknown order type '{}'", body.kind)))?;
    let status = OrderStatus::parse(&body.status)
        .ok_or_else(|| ApiError::Validation(format!("unknown status '{}'", body.status)))?;
    if body.order_id.trim().is_empty() {
        return Err(ApiError::Validation("orderId is required".to_string()));
    }

    let order = order_service::update_status(
        &state,
        &caller,
        kind,
        body.order_id.trim(),
        status,
        body.note,
    )
    .await?;

    Ok(Json(json!({ "ok": true, "order": order })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsQuery {
    #[serde(default)]
    pub fetch_order: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

fn partition_stats(orders: &[Order]) -> Value {
    let pending = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Pending)
        .count();
    json!({ "total": orders.len(), "pending": pending })
}

// GET /api/transactions[?fetchOrder=id][&status=s]
//
// The dashboard's one aggregate pull: every partition's list, the user
// table, counts, and optionally a single order with its event log.
pub async fn get_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<Value>, ApiError> {
    let status = match &query.status {
        Some(s) => Some(
            OrderStatus::parse(s)
                .ok_or_else(|| ApiError::Validation(format!("unknown status '{s}'")))?,
        ),
        None => None,
    };

    let recharge = order_service::list_orders(&state, OrderKind::Recharge, status).await;
    let withdraw = order_service::list_orders(&state, OrderKind::Withdraw, status).await;
    let buysell = order_service::list_orders(&state, OrderKind::Buysell, status).await;

    let users: Value = state
        .db
        .with_ledger(|ledger| {
            ledger
                .users
                .values()
                .map(|u| (u.user_id.clone(), json!({ "balance": u.balance })))
                .collect::<serde_json::Map<String, Value>>()
        })
        .await
        .into();

    let stats = json!({
        "users": users.as_object().map(|m| m.len()).unwrap_or(0),
        "recharge": partition_stats(&recharge),
        "withdraw": partition_stats(&withdraw),
        "buysell": partition_stats(&buysell),
    });

    let mut out = json!({
        "ok": true,
        "users": users,
        "recharge": recharge,
        "withdraw": withdraw,
        "buysell": buysell,
        "stats": stats,
    });

    if let Some(order_id) = &query.fetch_order {
        let (order, events) = order_service::get_order(&state, order_id).await?;
        out["order"] = serde_json::to_value(order).unwrap_or(Value::Null);
        out["orderEvents"] = serde_json::to_value(events).unwrap_or(Value::Null);
    }

    Ok(Json(out))
}
