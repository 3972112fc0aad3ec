//! Cookie-presence route guard for every page request.

use axum::{
    extract::Request,
    http::header::COOKIE,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::domain::route_guard::{RouteDecision, decide, is_guarded, token_from_cookie_header};

/// Redirects requests based on whether an `adminToken` cookie is present.
///
/// Only presence is checked here; the backend validates the token itself
/// when the dashboard fetches data with it.
///
/// # Cookie Format
///
/// ```text
/// Cookie: adminToken=<token>
/// ```
///
/// # Behaviour
///
/// - Asset and API paths (`/static/*`, `/favicon.ico`, `/api*`) pass untouched
/// - No token on `/admin*` → `307` to `/`
/// - Token on `/` → `307` to `/admin`
/// - Everything else passes through
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, middleware};
/// use crate::web::middleware::route_guard;
///
/// let app = Router::new()
///     .merge(pages)
///     .layer(middleware::from_fn(route_guard::layer));
/// ```
pub async fn layer(req: Request, next: Next) -> Response {
    let decision = {
        let path = req.uri().path();
        if !is_guarded(path) {
            RouteDecision::Next
        } else {
            let has_token = req
                .headers()
                .get_all(COOKIE)
                .iter()
                .filter_map(|value| value.to_str().ok())
                .any(|header| token_from_cookie_header(header).is_some());

            let decision = decide(path, has_token);
            if let RouteDecision::Redirect(to) = decision {
                debug!(path, has_token, to, "Route guard redirect");
            }
            decision
        }
    };

    match decision {
        RouteDecision::Next => next.run(req).await,
        RouteDecision::Redirect(to) => Redirect::temporary(to).into_response(),
    }
}
