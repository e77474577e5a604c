//! User DTOs - Data Transfer Objects per utenti e autenticazione

use super::settings::SettingsDTO;
use crate::entities::{Settings, User};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    static ref USERNAME_RE: Regex =
        Regex::new(r"^[A-Za-z0-9_]+$").expect("username regex must compile");
}

// struct per gestire io col client
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserDTO {
    pub id: i64,
    pub username: String,
    pub settings: SettingsDTO,
}

impl From<User> for UserDTO {
    fn from(value: User) -> Self {
        Self {
            id: value.user_id,
            username: value.username,
            settings: SettingsDTO::from(value.settings),
            // la password non viene mai esposta al client!!!
        }
    }
}

/// Body di POST /auth/register
#[derive(Deserialize, Debug, Validate)]
#[serde(deny_unknown_fields)]
pub struct RegisterUserDTO {
    #[validate(
        length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"),
        regex(path = *USERNAME_RE, message = "Username may contain only letters, digits and underscores")
    )]
    pub username: String,

    #[validate(length(min = 6, max = 128, message = "Password must be between 6 and 128 characters"))]
    pub password: String,
}

/// Body di POST /auth/login (nessuna validazione di formato: credenziali errate = 400 generico)
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct LoginDTO {
    pub username: String,
    pub password: String,
}

/// DTO per creare un nuovo utente (password già hashata)
#[derive(Debug, Clone)]
pub struct CreateUserDTO {
    pub username: String,
    pub password: String,
    pub settings: Settings,
}

/// Risposta di register/login
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponseDTO {
    pub token: String,
    pub user: UserDTO,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SignUpStatusDTO {
    pub sign_up_allowed: bool,
}
