use std::collections::HashMap;

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;

use crate::{
    auth,
    errors::ApiError,
    models::{Admin, AdminView, CurrentAdmin, Permissions},
    AppState,
};

/// Seeds the configured root admin into an empty directory so the
/// back-office is reachable on first boot.
pub async fn ensure_root_admin(state: &AppState) -> Result<(), ApiError> {
    if state.db.admin_count().await > 0 {
        return Ok(());
    }

    let password_hash = hash(&state.settings.root_admin_password, DEFAULT_COST)
        .map_err(|e| ApiError::Validation(format!("could not hash password: {e}")))?;

    let admin = Admin {
        id: state.settings.root_admin_id.clone(),
        password_hash,
        is_super: true,
        permissions: Permissions::all(),
        created: Utc::now().timestamp(),
    };

    let id = admin.id.clone();
    state.db.insert_admin(admin).await;
    tracing::info!("seeded root admin '{}'", id);
    Ok(())
}

pub async fn login(state: &AppState, id: &str, password: &str) -> Result<String, ApiError> {
    let admin = state
        .db
        .get_admin(id)
        .await
        .ok_or_else(|| ApiError::Auth("invalid id or password".to_string()))?;

    if !verify(password, &admin.password_hash).unwrap_or(false) {
        return Err(ApiError::Auth("invalid id or password".to_string()));
    }

    auth::make_token(state, &admin.id)
}

pub async fn list_admins(state: &AppState) -> HashMap<String, AdminView> {
    state
        .db
        .list_admins()
        .await
        .iter()
        .map(|(id, a)| (id.clone(), AdminView::from(a)))
        .collect()
}

pub async fn create_admin(
    state: &AppState,
    caller: &CurrentAdmin,
    id: &str,
    password: &str,
    permissions: Permissions,
    is_super: bool,
) -> Result<(), ApiError> {
    if !caller.is_super {
        return Err(ApiError::PermissionDenied(
            "super admin required".to_string(),
        ));
    }

    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::Validation("admin id is required".to_string()));
    }
    if password.is_empty() {
        return Err(ApiError::Validation("password is required".to_string()));
    }

    let password_hash = hash(password, DEFAULT_COST)
        .map_err(|e| ApiError::Validation(format!("could not hash password: {e}")))?;

    let admin = Admin {
        id: id.to_string(),
        password_hash,
        is_super,
        permissions,
        created: Utc::now().timestamp(),
    };

    if !state.db.insert_admin(admin).await {
        return Err(ApiError::Conflict(format!("admin '{id}' already exists")));
    }

    tracing::info!("admin '{}' created by '{}'", id, caller.id);
    Ok(())
}

pub async fn delete_admin(
    state: &AppState,
    caller: &CurrentAdmin,
    id: &str,
) -> Result<(), ApiError> {
    if !caller.is_super {
        return Err(ApiError::PermissionDenied(
            "super admin required".to_string(),
        ));
    }

    if !state.db.remove_admin(id).await {
        return Err(ApiError::NotFound(format!("no admin '{id}'")));
    }

    tracing::info!("admin '{}' deleted by '{}'", id, caller.id);
    Ok(())
}
