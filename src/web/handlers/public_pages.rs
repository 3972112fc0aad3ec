//! Account recovery and sign-up pages reachable without a session.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

/// Template shared by the informational public pages.
#[derive(Template, WebTemplate)]
#[template(path = "public_page.html")]
pub struct PublicPageTemplate {
    pub title: &'static str,
    pub message: &'static str,
}

/// `GET /Forgot-Password`
pub async fn forgot_password_handler() -> impl IntoResponse {
    PublicPageTemplate {
        title: "Forgot Password",
        message: "Password resets are issued by the backend administrator. \
                  Request a reset and you will receive a one-time code by email.",
    }
}

/// `GET /Otp-Verification`
pub async fn otp_verification_handler() -> impl IntoResponse {
    PublicPageTemplate {
        title: "OTP Verification",
        message: "Enter the one-time code you received to continue resetting your password.",
    }
}

/// `GET /set-new-password`
pub async fn set_new_password_handler() -> impl IntoResponse {
    PublicPageTemplate {
        title: "Set New Password",
        message: "Choose a new password once your one-time code has been verified.",
    }
}

/// `GET /signup`
pub async fn signup_handler() -> impl IntoResponse {
    PublicPageTemplate {
        title: "Sign Up",
        message: "Admin accounts are created by an existing administrator. \
                  Ask one to issue you an access token.",
    }
}
