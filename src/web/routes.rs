//! Dashboard page route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    admin_handler, forgot_password_handler, login_handler, login_submit_handler, logout_handler,
    otp_verification_handler, set_new_password_handler, signup_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Pages reachable without a token.
///
/// # Endpoints
///
/// - `GET /` - Login page
/// - `GET /Forgot-Password`, `/Otp-Verification`, `/set-new-password`, `/signup`
/// - `POST /logout` - Clear the session
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(login_handler))
        .route("/Forgot-Password", get(forgot_password_handler))
        .route("/Otp-Verification", get(otp_verification_handler))
        .route("/set-new-password", get(set_new_password_handler))
        .route("/signup", get(signup_handler))
        .route("/logout", post(logout_handler))
}

/// Token submission; split out so it can carry its own rate limit.
///
/// - `POST /login`
pub fn login_routes() -> Router<AppState> {
    Router::new().route("/login", post(login_submit_handler))
}

/// Admin pages, nested under `/admin`.
///
/// Guarded by [`crate::web::middleware::route_guard`].
///
/// - `GET /` - Metric cards and earning chart
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/", get(admin_handler))
}
