use axum::{
    extract::{Extension, State},
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{errors::ApiError, models::CurrentAdmin, AppState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    // admin id
    pub sub: String,
    // expiry (unix timestamp seconds)
    pub exp: usize,
}

pub fn make_token(state: &AppState, admin_id: &str) -> Result<String, ApiError> {
    let exp = (Utc::now() + Duration::hours(state.settings.token_ttl_hours)).timestamp() as usize;

    let claims = Claims {
        sub: admin_id.to_string(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.settings.jwt_secret.as_bytes()),
    )
    .map_err(|e| ApiError::Auth(format!("could not issue token: {e}")))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = raw.strip_prefix("Bearer ").or_else(|| raw.strip_prefix("bearer "))?;
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

/// Resolves `Authorization: Bearer` to a `CurrentAdmin` in request
/// extensions. The directory lookup makes deleting an admin revoke that
/// admin's outstanding tokens.
pub async fn inject_current_admin(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(req.headers()) {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(state.settings.jwt_secret.as_bytes()),
            &validation,
        );

        if let Ok(data) = decoded {
            if let Some(admin) = state.db.get_admin(&data.claims.sub).await {
                req.extensions_mut().insert(CurrentAdmin::from(&admin));
            }
        }
    }

    next.run(req).await
}

/// Handlers on protected routes call this on their `Option<Extension<_>>`.
pub fn require_admin(admin: Option<Extension<CurrentAdmin>>) -> Result<CurrentAdmin, ApiError> {
    match admin {
        Some(Extension(a)) => Ok(a),
        None => Err(ApiError::Auth("missing or invalid token".to_string())),
    }
}

pub fn require_super(admin: Option<Extension<CurrentAdmin>>) -> Result<CurrentAdmin, ApiError> {
    let a = require_admin(admin)?;
    if !a.is_super {
        return Err(ApiError::PermissionDenied(
            "super admin required".to_string(),
        ));
    }
    Ok(a)
}
