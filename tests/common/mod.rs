#![allow(dead_code)]

use axum_test::TestServer;
use chrono::Duration;
use expense_tracker::core::{AppState, RegistrationGate, encode_jwt};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use std::sync::Arc;

pub const TEST_JWT_SECRET: &str = "ilmiobellissimosegretochevaassolutamentecambiato";

/// Crea un AppState per i test
///
/// # Arguments
/// * `pool` - Connection pool SQLite creato da `#[sqlx::test]`
///
/// # Returns
/// Arc<AppState> configurato con il JWT secret di test e il gate letto da `app_settings`
pub fn create_test_state(pool: SqlitePool) -> Arc<AppState> {
    Arc::new(AppState::new(pool, TEST_JWT_SECRET.to_string()))
}

/// Come `create_test_state`, ma con un registration gate sostituito
pub fn create_test_state_with_gate(
    pool: SqlitePool,
    gate: Arc<dyn RegistrationGate>,
) -> Arc<AppState> {
    Arc::new(AppState::new(pool, TEST_JWT_SECRET.to_string()).with_registration_gate(gate))
}

/// Crea un TestServer per i test
///
/// # Arguments
/// * `state` - AppState da utilizzare per il server
///
/// # Returns
/// TestServer configurato e pronto per eseguire richieste
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = expense_tracker::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Genera un JWT token per testing, valido per 24 ore
pub fn create_test_jwt(user_id: i64, jwt_secret: &str) -> String {
    encode_jwt(user_id, jwt_secret, Duration::hours(24)).expect("Failed to create JWT token")
}

/// Header `Authorization: Bearer <token>`
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Registra un utente tramite API e restituisce il body `{token, user}`
pub async fn register(server: &TestServer, username: &str, password: &str) -> Value {
    let response = server
        .post("/auth/register")
        .json(&json!({ "username": username, "password": password }))
        .await;
    response.assert_status_ok();
    response.json()
}
