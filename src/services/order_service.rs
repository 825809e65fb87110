use chrono::Utc;

use crate::{
    errors::ApiError,
    models::{CurrentAdmin, Order, OrderChange, OrderEvent, OrderKind, OrderStatus},
    store::{Ledger, OrderRecord},
    AppState,
};

use super::balance_service;

pub struct NewOrder {
    pub kind: OrderKind,
    pub user_id: String,
    pub amount: f64,
    pub coin: Option<String>,
    pub wallet: Option<String>,
    pub ip: Option<String>,
}

/// Stores a fresh pending order with its creation event and broadcasts it.
pub async fn create_order(state: &AppState, new: NewOrder) -> Result<String, ApiError> {
    let user_id = new.user_id.trim().to_string();
    if user_id.is_empty() {
        return Err(ApiError::Validation("userId is required".to_string()));
    }
    if !new.amount.is_finite() || new.amount <= 0.0 {
        return Err(ApiError::Validation("amount must be positive".to_string()));
    }

    let order_id = state.db.next_order_id();
    let now = Utc::now().timestamp();

    let order = Order {
        order_id: order_id.clone(),
        kind: new.kind,
        user_id: user_id.clone(),
        time: now,
        amount: new.amount,
        coin: new.coin,
        wallet: new.wallet,
        ip: new.ip,
        status: OrderStatus::Pending,
        note: None,
    };

    let record = OrderRecord {
        order: order.clone(),
        events: vec![OrderEvent {
            time: now,
            admin: user_id.clone(),
            status: OrderStatus::Pending,
            note: None,
        }],
    };

    state
        .db
        .with_ledger(move |ledger| {
            // first touch for the submitting user
            ledger.user_mut(&user_id);
            ledger.orders.insert(order_id.clone(), record);
        })
        .await;

    publish(state, &order);

    tracing::info!(
        "order {} created: {} {} by {}",
        order.order_id,
        order.kind,
        order.amount,
        order.user_id
    );
    Ok(order.order_id)
}

/// Newest-first listing of one partition, optionally filtered by status.
pub async fn list_orders(
    state: &AppState,
    kind: OrderKind,
    status: Option<OrderStatus>,
) -> Vec<Order> {
    state
        .db
        .with_ledger(move |ledger| {
            let mut orders: Vec<Order> = ledger
                .orders
                .values()
                .filter(|r| r.order.kind == kind)
                .filter(|r| status.map_or(true, |s| r.order.status == s))
                .map(|r| r.order.clone())
                .collect();
            orders.sort_by(|a, b| b.time.cmp(&a.time).then(b.order_id.cmp(&a.order_id)));
            orders
        })
        .await
}

/// Looks an order up across all three partitions.
pub async fn get_order(
    state: &AppState,
    order_id: &str,
) -> Result<(Order, Vec<OrderEvent>), ApiError> {
    let order_id = order_id.to_string();
    state
        .db
        .with_ledger(move |ledger| {
            ledger
                .orders
                .get(&order_id)
                .map(|r| (r.order.clone(), r.events.clone()))
                .ok_or_else(|| ApiError::NotFound(format!("no order '{order_id}'")))
        })
        .await
}

/// Admin status change. Validates the transition table, settles funds
/// exactly once (on approval), appends the audit event, and broadcasts.
/// Everything up to the broadcast is one critical section: if the
/// settlement fails, the status does not change either.
pub async fn update_status(
    state: &AppState,
    admin: &CurrentAdmin,
    kind: OrderKind,
    order_id: &str,
    new_status: OrderStatus,
    note: Option<String>,
) -> Result<Order, ApiError> {
    if !admin.can_update(kind) {
        return Err(ApiError::PermissionDenied(format!(
            "admin '{}' may not update {} orders",
            admin.id, kind
        )));
    }

    let order_id = order_id.to_string();
    let admin_id = admin.id.clone();

    let order = state
        .db
        .with_ledger(move |ledger| {
            let Ledger { users, orders } = ledger;

            let record = orders
                .get_mut(&order_id)
                .ok_or_else(|| ApiError::NotFound(format!("no order '{order_id}'")))?;

            if record.order.kind != kind {
                return Err(ApiError::Validation(format!(
                    "order '{}' is a {} order, not {}",
                    order_id, record.order.kind, kind
                )));
            }

            let from = record.order.status;
            if !from.can_transition_to(new_status) {
                return Err(ApiError::InvalidTransition {
                    from,
                    to: new_status,
                });
            }

            // Funds move once, at approval. Recharge credits, withdraw
            // debits, buysell is workflow-only. A failed debit aborts the
            // whole change.
            if new_status == OrderStatus::Approved {
                let delta = match record.order.kind {
                    OrderKind::Recharge => record.order.amount,
                    OrderKind::Withdraw => -record.order.amount,
                    OrderKind::Buysell => 0.0,
                };
                if delta != 0.0 {
                    balance_service::apply_delta(users, &record.order.user_id, delta)?;
                }
            }

            record.order.status = new_status;
            if note.is_some() {
                record.order.note = note.clone();
            }
            record.events.push(OrderEvent {
                time: Utc::now().timestamp(),
                admin: admin_id.clone(),
                status: new_status,
                note,
            });

            Ok(record.order.clone())
        })
        .await?;

    publish(state, &order);

    tracing::info!(
        "order {} set to {} by '{}'",
        order.order_id,
        order.status,
        admin.id
    );
    Ok(order)
}

/// Best-effort fan-out; a send error just means nobody is listening.
fn publish(state: &AppState, order: &Order) {
    let change = OrderChange {
        kind: order.kind,
        order_id: order.order_id.clone(),
        status: order.status,
    };
    if let Ok(payload) = serde_json::to_string(&change) {
        let _ = state.events_tx.send(payload);
    }
}
