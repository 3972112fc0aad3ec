//! HTML template rendering handlers for the dashboard.

mod admin;
mod login;
mod public_pages;

pub use admin::admin_handler;
pub use login::{
    LoginForm, expired_cookie, login_handler, login_submit_handler, logout_handler,
    session_cookie,
};
pub use public_pages::{
    forgot_password_handler, otp_verification_handler, set_new_password_handler, signup_handler,
};
