use crate::core::{AppError, AppState};
use axum::extract::State;
use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, Response, header},
    middleware::Next,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Durata di default dei token (ore)
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 100;

/// Header legacy con il token "nudo", accettato insieme a `Authorization: Bearer`
pub const LEGACY_TOKEN_HEADER: &str = "x-auth-token";

// struct che codifica il contenuto del token jwt
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize, // Expiry time of the token
    pub iat: usize, // Issued at time of the token
    pub user: ClaimsUser,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimsUser {
    pub id: i64,
}

/// Identità autenticata, inserita nelle Extension dal middleware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
}

#[instrument(skip(secret))]
pub fn encode_jwt(user_id: i64, secret: &str, ttl: Duration) -> Result<String, AppError> {
    debug!("Encoding JWT token for user");
    let now = Utc::now();
    let exp: usize = (now + ttl).timestamp().max(0) as usize;
    let iat: usize = now.timestamp() as usize;
    let claim = Claims {
        iat,
        exp,
        user: ClaimsUser { id: user_id },
    };

    encode(
        &Header::default(),
        &claim,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map(|token| {
        info!("JWT token encoded successfully");
        token
    })
    .map_err(|e| {
        error!("Failed to encode JWT token: {:?}", e);
        AppError::internal_server_error("Server error")
    })
}

#[instrument(skip(jwt_token, secret))]
pub fn decode_jwt(jwt_token: &str, secret: &str) -> Result<Claims, AppError> {
    debug!("Decoding JWT token");
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        jwt_token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )
    .map(|data| {
        debug!("JWT token decoded successfully for user: {}", data.claims.user.id);
        data.claims
    })
    .map_err(|e| {
        warn!("Failed to decode JWT token: {:?}", e);
        AppError::unauthorized("Token is not valid")
    })
}

/// Estrae il token da `Authorization: Bearer <token>` oppure da `x-auth-token`.
/// `None` se nessun header è presente; `Some(Err)` se l'header c'è ma è malformato.
fn extract_token(headers: &HeaderMap) -> Option<Result<&str, AppError>> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let parsed = value
            .to_str()
            .ok()
            .and_then(|raw| {
                let mut parts = raw.split_whitespace();
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => {
                        Some(token)
                    }
                    _ => None,
                }
            })
            .ok_or_else(|| {
                warn!("Invalid authorization header format");
                AppError::unauthorized("Invalid authorization header")
            });
        return Some(parsed);
    }

    headers.get(LEGACY_TOKEN_HEADER).map(|value| {
        value
            .to_str()
            .ok()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                warn!("Invalid {} header", LEGACY_TOKEN_HEADER);
                AppError::unauthorized("Invalid authorization header")
            })
    })
}

#[instrument(skip(state, req, next))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authentication middleware");
    let claims = match extract_token(req.headers()) {
        Some(token) => decode_jwt(token?, &state.jwt_secret)?,
        None => {
            warn!("Missing authorization header");
            return Err(AppError::unauthorized("No token, authorization denied"));
        }
    };

    // nessuna query al db: l'identità arriva solo dal token firmato
    req.extensions_mut().insert(CurrentUser {
        id: claims.user.id,
    });
    Ok(next.run(req).await)
}
