pub mod auth;
pub mod dashboard;
pub mod employees;
pub mod inventory;
pub mod issue;
pub mod offices;
pub mod purchase;
pub mod transfer;

pub use dashboard::dashboard;

use askama::Template;
use axum::{
    http::Uri,
    response::{Html, Redirect},
};
use tower_cookies::Cookies;

use crate::middleware::{get_current_session, login_redirect, CurrentSession};

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate {
    session: CurrentSession,
}

pub async fn not_found(cookies: Cookies, uri: Uri) -> Result<Html<String>, Redirect> {
    let session = get_current_session(&cookies).ok_or_else(|| login_redirect(uri.path()))?;

    let template = NotFoundTemplate { session };
    Ok(Html(template.render().unwrap()))
}
