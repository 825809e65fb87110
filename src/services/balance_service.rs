use std::collections::HashMap;

use crate::{errors::ApiError, models::User, AppState};

/// Returns 0 for unknown users; the read creates the record (first-touch).
pub async fn get_balance(state: &AppState, user_id: &str) -> Result<f64, ApiError> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(ApiError::Validation("userid is required".to_string()));
    }

    let user_id = user_id.to_string();
    Ok(state
        .db
        .with_ledger(move |ledger| ledger.user_mut(&user_id).balance)
        .await)
}

/// Serialized read-modify-write; never lets a balance go negative.
pub async fn adjust_balance(state: &AppState, user_id: &str, delta: f64) -> Result<f64, ApiError> {
    let user_id = user_id.to_string();
    state
        .db
        .with_ledger(move |ledger| apply_delta(&mut ledger.users, &user_id, delta))
        .await
}

pub(crate) fn apply_delta(
    users: &mut HashMap<String, User>,
    user_id: &str,
    delta: f64,
) -> Result<f64, ApiError> {
    let user = users
        .entry(user_id.to_string())
        .or_insert_with(|| User::new(user_id));
    let next = user.balance + delta;
    if next < 0.0 {
        return Err(ApiError::InsufficientBalance {
            available: user.balance,
            required: -delta,
        });
    }
    user.balance = next;
    Ok(next)
}

/// Back-office add/deduct tool: unconditional set, skips the
/// non-negativity check on purpose.
pub async fn set_balance(state: &AppState, user_id: &str, value: f64) -> Result<(), ApiError> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(ApiError::Validation("userid is required".to_string()));
    }

    let user_id = user_id.to_string();
    state
        .db
        .with_ledger(move |ledger| ledger.user_mut(&user_id).balance = value)
        .await;
    Ok(())
}
