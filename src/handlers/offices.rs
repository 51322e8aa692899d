use askama::Template;
use axum::{
    extract::{Form, Query, State},
    response::{Html, Redirect},
};
use serde::{Deserialize, Serialize};
use tower_cookies::Cookies;

use crate::{
    api::ApiClient,
    middleware::{get_current_session, login_redirect, CurrentSession},
    models::Office,
    search::matches_term,
    utils::{first_missing, missing_field_message},
};

#[derive(Template)]
#[template(path = "offices/list.html")]
struct OfficesTemplate {
    session: CurrentSession,
    offices: Vec<Office>,
    term: String,
    error: String,
    notice: String,
}

#[derive(Template)]
#[template(path = "offices/form.html")]
struct OfficeFormTemplate {
    session: CurrentSession,
    form: OfficeForm,
    error: String,
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    q: String,
    #[serde(default)]
    msg: String,
}

/// Draft of one office record; doubles as the JSON body of the write
/// endpoint. `Password` is write-only and never rendered back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfficeForm {
    #[serde(rename = "OfficeCode", default)]
    pub office_code: String,
    #[serde(rename = "OfficeName", default)]
    pub office_name: String,
    #[serde(rename = "OfficeAddress", default)]
    pub office_address: String,
    #[serde(rename = "AdminName", default)]
    pub admin_name: String,
    #[serde(rename = "AdminMail", default)]
    pub admin_mail: String,
    #[serde(rename = "AdminPhone", default)]
    pub admin_phone: String,
    #[serde(rename = "Password", default)]
    pub password: String,
    #[serde(rename = "Role", default)]
    pub role: String,
}

impl OfficeForm {
    pub fn required_fields(&self) -> [(&'static str, &str); 8] {
        [
            ("OfficeCode", self.office_code.as_str()),
            ("OfficeName", self.office_name.as_str()),
            ("OfficeAddress", self.office_address.as_str()),
            ("AdminName", self.admin_name.as_str()),
            ("AdminMail", self.admin_mail.as_str()),
            ("AdminPhone", self.admin_phone.as_str()),
            ("Password", self.password.as_str()),
            ("Role", self.role.as_str()),
        ]
    }
}

pub async fn offices_list(
    cookies: Cookies,
    State(api): State<ApiClient>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, Redirect> {
    let session = get_current_session(&cookies).ok_or_else(|| login_redirect("/offices"))?;

    let mut error = String::new();
    let offices = match api.list_offices().await {
        Ok(rows) => rows,
        Err(err) => {
            error = err.user_message(
                "Failed to fetch office data.",
                "Failed to fetch office data.",
            );
            Vec::new()
        }
    };

    let offices = offices
        .into_iter()
        .filter(|o| matches_term(&query.q, &[o.office_name.as_deref(), o.office_code.as_deref()]))
        .collect();

    let template = OfficesTemplate {
        session,
        offices,
        term: query.q,
        error,
        notice: query.msg,
    };
    Ok(Html(template.render().unwrap()))
}

pub async fn office_form(cookies: Cookies) -> Result<Html<String>, Redirect> {
    let session = get_current_session(&cookies).ok_or_else(|| login_redirect("/offices/new"))?;

    Ok(render_form(session, OfficeForm::default(), String::new()))
}

pub async fn create_office(
    cookies: Cookies,
    State(api): State<ApiClient>,
    Form(form): Form<OfficeForm>,
) -> Result<Redirect, Html<String>> {
    let Some(session) = get_current_session(&cookies) else {
        return Ok(login_redirect("/offices"));
    };

    if let Some(field) = first_missing(&form.required_fields()) {
        return Err(render_form(session, form, missing_field_message(field)));
    }

    match api.add_office(&form).await {
        Ok(()) => Ok(Redirect::to(&format!(
            "/offices?msg={}",
            urlencoding::encode("Office added successfully!")
        ))),
        Err(err) => {
            let message = err.user_message(
                "An error occurred. Please try again.",
                "Failed to add office.",
            );
            Err(render_form(session, form, message))
        }
    }
}

fn render_form(session: CurrentSession, form: OfficeForm, error: String) -> Html<String> {
    let template = OfficeFormTemplate {
        session,
        form,
        error,
    };
    Html(template.render().unwrap())
}
