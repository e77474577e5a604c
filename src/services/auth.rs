//! Auth services - Gestione autenticazione, registrazione e impostazioni utente

use crate::core::{AppError, AppState, CurrentUser, encode_jwt};
use crate::dtos::{
    AuthResponseDTO, CreateUserDTO, LoginDTO, RegisterUserDTO, SettingsDTO, SignUpStatusDTO,
    UpdateSettingsDTO, UserDTO,
};
use crate::entities::user::{BCRYPT_COST, verify_hash};
use crate::entities::{Settings, User};
use crate::repositories::{Create, Read, Update};
use axum::{
    Extension,
    extract::{Json, State},
};
use lazy_static::lazy_static;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

const DUPLICATE_USER: &str = "User already exists";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

lazy_static! {
    // hash usato quando l'utente non esiste, così login con username sconosciuto
    // e login con password errata costano lo stesso tempo
    static ref DUMMY_HASH: String =
        bcrypt::hash("dummy-password-never-matches", BCRYPT_COST).unwrap_or_default();
}

/// Calcola l'hash bcrypt sul pool bloccante di tokio
async fn hash_on_blocking_pool(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || User::hash_password(&password))
        .await
        .map_err(|e| AppError::internal_server_error("Server error").with_details(e.to_string()))?
        .map_err(|e| AppError::internal_server_error("Server error").with_details(e.to_string()))
}

/// Verifica sul pool bloccante; senza hash dell'utente usa `DUMMY_HASH`
async fn verify_on_blocking_pool(
    password: String,
    hashed: Option<String>,
) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || {
        let hashed = hashed.unwrap_or_else(|| DUMMY_HASH.clone());
        verify_hash(&password, &hashed)
    })
    .await
    .map_err(|e| AppError::internal_server_error("Server error").with_details(e.to_string()))
}

/// Calcola `DUMMY_HASH` all'avvio, fuori dal runtime async
pub async fn warm_up_dummy_hash() -> Result<(), AppError> {
    tokio::task::spawn_blocking(|| lazy_static::initialize(&DUMMY_HASH))
        .await
        .map_err(|e| AppError::internal_server_error("Server error").with_details(e.to_string()))
}

async fn ensure_sign_up_open(state: &AppState) -> Result<(), AppError> {
    if state.registration.is_sign_up_allowed().await? {
        Ok(())
    } else {
        warn!("Registration attempt while sign up is disabled");
        Err(AppError::forbidden("Registration is currently disabled"))
    }
}

/// Inserisce l'utente; una violazione UNIQUE sullo username diventa 400
async fn insert_user(state: &AppState, new_user: &CreateUserDTO) -> Result<User, AppError> {
    // due register concorrenti: il vincolo UNIQUE decide chi vince
    state.user.create(new_user).await.map_err(|e| {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return AppError::bad_request(DUPLICATE_USER);
            }
        }
        AppError::from(e)
    })
}

/// Crea un nuovo account con le impostazioni di default.
///
/// Ordine dei controlli: gate di registrazione (403), formato (400), username duplicato (400).
pub async fn register(state: &AppState, body: &RegisterUserDTO) -> Result<User, AppError> {
    ensure_sign_up_open(state).await?;
    body.validate()?;

    if state.user.find_by_username(&body.username).await?.is_some() {
        return Err(AppError::bad_request(DUPLICATE_USER));
    }

    let new_user = CreateUserDTO {
        username: body.username.clone(),
        password: hash_on_blocking_pool(body.password.clone()).await?,
        settings: Settings::new_default(),
    };

    insert_user(state, &new_user).await
}

/// Verifica username e password; utente mancante e password errata producono lo stesso errore
pub async fn verify_credentials(
    state: &AppState,
    username: &str,
    password: &str,
) -> Result<User, AppError> {
    let user = state.user.find_by_username(username).await?;

    let hashed = user.as_ref().map(|user| user.password.clone());
    let matches = verify_on_blocking_pool(password.to_string(), hashed).await?;

    match user {
        Some(user) if matches => Ok(user),
        _ => Err(AppError::bad_request(INVALID_CREDENTIALS)),
    }
}

fn auth_response(state: &AppState, user: User) -> Result<Json<AuthResponseDTO>, AppError> {
    let token = encode_jwt(user.user_id, &state.jwt_secret, state.token_ttl)?;
    Ok(Json(AuthResponseDTO {
        token,
        user: UserDTO::from(user),
    }))
}

#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterUserDTO>, // JSON body
) -> Result<Json<AuthResponseDTO>, AppError> {
    let user = register(&state, &body).await?;
    info!("User registered with id {}", user.user_id);

    auth_response(&state, user)
}

#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn login_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginDTO>, // JSON body
) -> Result<Json<AuthResponseDTO>, AppError> {
    let user = verify_credentials(&state, &body.username, &body.password)
        .await
        .inspect_err(|e| warn!("Login failed with status {}", e.status()))?;
    info!("User {} logged in", user.user_id);

    auth_response(&state, user)
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn current_user(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<Json<UserDTO>, AppError> {
    let user = state
        .user
        .read(&current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(UserDTO::from(user)))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
pub async fn update_user_settings(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(body): Json<UpdateSettingsDTO>,
) -> Result<Json<SettingsDTO>, AppError> {
    body.validate()?;

    let settings = state
        .user
        .update(&current_user.id, &body)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::not_found("User not found"),
            other => AppError::from(other),
        })?;
    debug!("Settings updated: {:?}", settings);

    Ok(Json(SettingsDTO::from(settings)))
}

#[instrument(skip(state))]
pub async fn signup_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SignUpStatusDTO>, AppError> {
    let sign_up_allowed = state.registration.is_sign_up_allowed().await?;
    Ok(Json(SignUpStatusDTO { sign_up_allowed }))
}
