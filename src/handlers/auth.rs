use askama::Template;
use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_cookies::{Cookie, Cookies};

use crate::{
    api::ApiClient,
    handlers::offices::OfficeForm,
    utils::{create_token, first_missing, missing_field_message, Claims},
};

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    error: String,
    notice: String,
    next: String,
}

#[derive(Template)]
#[template(path = "register.html")]
struct RegisterTemplate {
    error: String,
    form: OfficeForm,
}

#[derive(Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    next: String,
    #[serde(default)]
    msg: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    next: String,
}

/// The login page is always reachable, session or not.
pub async fn login_page(Query(query): Query<LoginQuery>) -> Html<String> {
    let template = LoginTemplate {
        error: String::new(),
        notice: query.msg,
        next: query.next,
    };
    Html(template.render().unwrap())
}

pub async fn register_page() -> Html<String> {
    let template = RegisterTemplate {
        error: String::new(),
        form: OfficeForm::default(),
    };
    Html(template.render().unwrap())
}

pub async fn login(
    State(api): State<ApiClient>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, Html<String>> {
    let render_error = |error: String, next: String| {
        let template = LoginTemplate {
            error,
            notice: String::new(),
            next,
        };
        Html(template.render().unwrap())
    };

    match api.login(&form.email, &form.password).await {
        Ok(data) => {
            let claims = Claims::new(data.office_id, data.office_code, data.admin_name, data.role);
            let token = create_token(&claims)
                .map_err(|_| render_error("Authentication failed".to_string(), form.next.clone()))?;

            let cookie = Cookie::build(("auth_token", token))
                .path("/")
                .http_only(true)
                .build();
            cookies.add(cookie);

            Ok(Redirect::to(safe_next(&form.next)))
        }
        Err(err) => Err(render_error(
            err.user_message(
                "An error occurred. Please try again.",
                "Invalid email or password",
            ),
            form.next,
        )),
    }
}

/// Clears the session marker client-side only; no invalidation call is made.
pub async fn logout(cookies: Cookies) -> impl IntoResponse {
    let mut cookie = Cookie::from("auth_token");
    cookie.set_path("/");
    cookies.remove(cookie);
    Redirect::to("/login")
}

/// Registration creates an Office record, which doubles as the login
/// principal on the remote service.
pub async fn register(
    State(api): State<ApiClient>,
    Form(form): Form<OfficeForm>,
) -> Result<Redirect, Html<String>> {
    let render_error = |error: String, form: OfficeForm| {
        let template = RegisterTemplate { error, form };
        Html(template.render().unwrap())
    };

    if let Some(field) = first_missing(&form.required_fields()) {
        return Err(render_error(missing_field_message(field), form));
    }

    match api.add_office(&form).await {
        Ok(()) => Ok(Redirect::to(&format!(
            "/login?msg={}",
            urlencoding::encode("Office added successfully!")
        ))),
        Err(err) => {
            let message = err.user_message(
                "An error occurred. Please try again.",
                "Failed to add office.",
            );
            Err(render_error(message, form))
        }
    }
}

/// Only local absolute paths are honored as post-login destinations.
fn safe_next(next: &str) -> &str {
    if next.starts_with('/') && !next.starts_with("//") {
        next
    } else {
        "/dashboard"
    }
}

#[cfg(test)]
mod tests {
    use super::safe_next;

    #[test]
    fn local_paths_are_kept() {
        assert_eq!(safe_next("/employees"), "/employees");
        assert_eq!(safe_next("/purchase?q=acme"), "/purchase?q=acme");
    }

    #[test]
    fn everything_else_lands_on_the_dashboard() {
        assert_eq!(safe_next(""), "/dashboard");
        assert_eq!(safe_next("https://evil.example"), "/dashboard");
        assert_eq!(safe_next("//evil.example"), "/dashboard");
    }
}
