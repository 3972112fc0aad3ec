//! Login page, token submission and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::info;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::application::services::TokenError;
use crate::application::services::token_manager::is_valid_token;
use crate::domain::route_guard::{ADMIN_HOME, LOGIN_PATH, TOKEN_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

/// Template for the login page.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Login form body.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(
        length(min = 1, max = 4096, message = "Access token is required"),
        custom(function = "validate_token_chars")
    )]
    pub access_token: String,

    #[serde(default)]
    #[validate(
        length(max = 4096, message = "Refresh token is too long"),
        custom(function = "validate_token_chars")
    )]
    pub refresh_token: Option<String>,
}

fn validate_token_chars(token: &str) -> Result<(), ValidationError> {
    if token.is_empty() || is_valid_token(token) {
        Ok(())
    } else {
        Err(ValidationError::new("token_chars")
            .with_message("Tokens may only contain printable characters without spaces".into()))
    }
}

/// First human-readable message, access token errors first.
fn describe(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    ["access_token", "refresh_token"]
        .iter()
        .filter_map(|field| fields.get(*field))
        .filter_map(|errs| errs.first())
        .find_map(|e| e.message.as_ref())
        .map(|m| m.to_string())
        .unwrap_or_else(|| "Invalid token".to_string())
}

fn rejected(message: String) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        LoginTemplate {
            error: Some(message),
        },
    )
        .into_response()
}

/// Builds the `Set-Cookie` value for the session token.
pub fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", TOKEN_COOKIE, token);
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Builds the `Set-Cookie` value that deletes the session token.
pub fn expired_cookie(secure: bool) -> String {
    let mut cookie = format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", TOKEN_COOKIE);
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /`
///
/// Authenticated visitors never reach this handler: the route guard sends
/// them to `/admin`.
pub async fn login_handler() -> impl IntoResponse {
    LoginTemplate { error: None }
}

/// Stores submitted tokens and opens the session.
///
/// # Endpoint
///
/// `POST /login` (form: `access_token`, optional `refresh_token`)
///
/// # Responses
///
/// - `303` to `/admin` with the `adminToken` cookie set
/// - `422` with the login page and an error message on invalid input
/// - `500` if the token store cannot be written
pub async fn login_submit_handler(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        return Ok(rejected(describe(&errors)));
    }

    match state
        .token_manager
        .set_tokens(&form.access_token, form.refresh_token.as_deref())
        .await
    {
        Ok(()) => {}
        Err(e @ TokenError::Storage(_)) => return Err(e.into()),
        Err(e) => return Ok(rejected(e.to_string())),
    }

    state.dashboard_service.request_refresh();
    info!("Administrator session opened");

    let cookie = session_cookie(&form.access_token, state.cookie_secure);
    Ok(([(SET_COOKIE, cookie)], Redirect::to(ADMIN_HOME)).into_response())
}

/// Clears every stored token and the session cookie.
///
/// # Endpoint
///
/// `POST /logout` → `303` to `/`
pub async fn logout_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    state.token_manager.clear_tokens().await?;
    state.dashboard_service.request_refresh();
    info!("Administrator session closed");

    let cookie = expired_cookie(state.cookie_secure);
    Ok(([(SET_COOKIE, cookie)], Redirect::to(LOGIN_PATH)).into_response())
}
