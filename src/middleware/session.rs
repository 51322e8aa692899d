use axum::response::Redirect;
use serde::{Deserialize, Serialize};
use tower_cookies::Cookies;

use crate::utils::verify_token;

/// The caller's office scope, resolved from the session cookie. Threaded
/// explicitly into handlers and templates; nothing reads it ambiently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentSession {
    pub office_id: String,
    pub office_code: String,
    pub admin_name: String,
    pub role: String,
}

/// Resolves the session from the `auth_token` cookie. `None` when the cookie
/// is absent or does not verify.
pub fn get_current_session(cookies: &Cookies) -> Option<CurrentSession> {
    let token = cookies.get("auth_token")?.value().to_string();
    let claims = verify_token(&token).ok()?;

    Some(CurrentSession {
        office_id: claims.sub,
        office_code: claims.office_code,
        admin_name: claims.admin_name,
        role: claims.role,
    })
}

/// Redirect to the login page, carrying the originally requested path so the
/// login handler can return the user there afterwards.
pub fn login_redirect(next: &str) -> Redirect {
    Redirect::to(&format!("/login?next={}", urlencoding::encode(next)))
}
