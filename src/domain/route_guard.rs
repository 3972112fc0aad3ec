//! Request-time routing decision based on token presence.
//!
//! Pure predicate used by [`crate::web::middleware::route_guard`]. Keeping it
//! free of HTTP types makes the decision table easy to test.

/// Cookie carrying the admin session token.
pub const TOKEN_COOKIE: &str = "adminToken";

/// Login page; also where unauthenticated admin requests are sent.
pub const LOGIN_PATH: &str = "/";

/// Landing page for authenticated users.
pub const ADMIN_HOME: &str = "/admin";

/// Pages reachable without a token (exact match).
pub const PUBLIC_ROUTES: [&str; 5] = [
    "/",
    "/Forgot-Password",
    "/Otp-Verification",
    "/set-new-password",
    "/signup",
];

/// Leading path segments the guard never inspects.
const EXCLUDED_PREFIXES: [&str; 3] = ["static", "favicon.ico", "api"];

/// Outcome of the guard for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Pass the request through.
    Next,
    /// Redirect to the given path.
    Redirect(&'static str),
}

/// Returns `false` for asset and API paths the guard must not touch.
pub fn is_guarded(path: &str) -> bool {
    let rest = path.strip_prefix('/').unwrap_or(path);
    !EXCLUDED_PREFIXES
        .iter()
        .any(|prefix| rest.starts_with(prefix))
}

/// Decides what to do with a request for `path`.
///
/// Rules are evaluated in order:
///
/// | token | path                 | decision            |
/// |-------|----------------------|---------------------|
/// | no    | public route         | `Next`              |
/// | no    | starts with `/admin` | redirect to `/`     |
/// | yes   | `/`                  | redirect to `/admin`|
/// | yes   | starts with `/admin` | `Next`              |
/// | any   | anything else        | `Next`              |
pub fn decide(path: &str, has_token: bool) -> RouteDecision {
    if !has_token && PUBLIC_ROUTES.contains(&path) {
        return RouteDecision::Next;
    }

    if !has_token && path.starts_with(ADMIN_HOME) {
        return RouteDecision::Redirect(LOGIN_PATH);
    }

    if has_token && path == LOGIN_PATH {
        return RouteDecision::Redirect(ADMIN_HOME);
    }

    RouteDecision::Next
}

/// Extracts the token cookie from a raw `Cookie` header value.
///
/// Empty values count as absent.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header.split(';').find_map(|cookie| {
        let (name, value) = cookie.trim().split_once('=')?;
        (name == TOKEN_COOKIE && !value.is_empty()).then_some(value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_routes_without_token() {
        for route in PUBLIC_ROUTES {
            assert_eq!(decide(route, false), RouteDecision::Next, "{route}");
        }
    }

    #[test]
    fn test_admin_without_token_redirects_to_login() {
        assert_eq!(decide("/admin", false), RouteDecision::Redirect("/"));
        assert_eq!(decide("/admin/users", false), RouteDecision::Redirect("/"));
        assert_eq!(decide("/administrator", false), RouteDecision::Redirect("/"));
    }

    #[test]
    fn test_login_with_token_redirects_to_admin() {
        assert_eq!(decide("/", true), RouteDecision::Redirect("/admin"));
    }

    #[test]
    fn test_admin_with_token_passes() {
        assert_eq!(decide("/admin", true), RouteDecision::Next);
        assert_eq!(decide("/admin/overview.json", true), RouteDecision::Next);
    }

    #[test]
    fn test_other_paths_pass_either_way() {
        assert_eq!(decide("/signup", true), RouteDecision::Next);
        assert_eq!(decide("/pricing", false), RouteDecision::Next);
        assert_eq!(decide("/pricing", true), RouteDecision::Next);
        // Public routes are exact matches only.
        assert_eq!(decide("/signup/extra", false), RouteDecision::Next);
    }

    #[test]
    fn test_is_guarded() {
        assert!(is_guarded("/"));
        assert!(is_guarded("/admin"));
        assert!(!is_guarded("/static/dashboard.css"));
        assert!(!is_guarded("/favicon.ico"));
        assert!(!is_guarded("/api/anything"));
        assert!(!is_guarded("/apiary"));
    }

    #[test]
    fn test_token_from_cookie_header() {
        assert_eq!(token_from_cookie_header("adminToken=abc"), Some("abc"));
        assert_eq!(
            token_from_cookie_header("theme=dark; adminToken=xyz; lang=en"),
            Some("xyz")
        );
        assert_eq!(token_from_cookie_header("adminToken="), None);
        assert_eq!(token_from_cookie_header("authToken=abc"), None);
        assert_eq!(token_from_cookie_header(""), None);
    }
}
