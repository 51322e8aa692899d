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
    models::{Employee, Office},
    search::matches_term,
    utils::{first_missing, missing_field_message},
};

#[derive(Template)]
#[template(path = "employees/list.html")]
struct EmployeesTemplate {
    session: CurrentSession,
    employees: Vec<Employee>,
    term: String,
    error: String,
    notice: String,
}

#[derive(Template)]
#[template(path = "employees/form.html")]
struct EmployeeFormTemplate {
    session: CurrentSession,
    form: EmployeeForm,
    offices: Vec<Office>,
    error: String,
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    q: String,
    #[serde(default)]
    msg: String,
}

/// Draft of one employee record; doubles as the JSON body of the write
/// endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeForm {
    #[serde(rename = "EmpId", default)]
    pub emp_id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Mail", default)]
    pub mail: String,
    #[serde(rename = "OfficeCode", default)]
    pub office_code: String,
}

impl EmployeeForm {
    fn required_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("EmpId", self.emp_id.as_str()),
            ("Name", self.name.as_str()),
            ("Mail", self.mail.as_str()),
            ("OfficeCode", self.office_code.as_str()),
        ]
    }
}

pub async fn employees_list(
    cookies: Cookies,
    State(api): State<ApiClient>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, Redirect> {
    let session = get_current_session(&cookies).ok_or_else(|| login_redirect("/employees"))?;

    let mut error = String::new();
    let employees = match api.list_employees().await {
        Ok(rows) => rows,
        Err(err) => {
            error = err.user_message(
                "Failed to fetch employee data.",
                "Failed to fetch employee data.",
            );
            Vec::new()
        }
    };

    let employees = employees
        .into_iter()
        .filter(|e| matches_term(&query.q, &[e.name.as_deref(), e.emp_id.as_deref()]))
        .collect();

    let template = EmployeesTemplate {
        session,
        employees,
        term: query.q,
        error,
        notice: query.msg,
    };
    Ok(Html(template.render().unwrap()))
}

pub async fn employee_form(
    cookies: Cookies,
    State(api): State<ApiClient>,
) -> Result<Html<String>, Redirect> {
    let session = get_current_session(&cookies).ok_or_else(|| login_redirect("/employees/new"))?;

    Ok(render_form(&api, session, EmployeeForm::default(), String::new()).await)
}

pub async fn create_employee(
    cookies: Cookies,
    State(api): State<ApiClient>,
    Form(form): Form<EmployeeForm>,
) -> Result<Redirect, Html<String>> {
    let Some(session) = get_current_session(&cookies) else {
        return Ok(login_redirect("/employees"));
    };

    // No network call until every required field is filled
    if let Some(field) = first_missing(&form.required_fields()) {
        return Err(render_form(&api, session, form, missing_field_message(field)).await);
    }

    match api.add_employee(&form).await {
        Ok(()) => Ok(Redirect::to(&format!(
            "/employees?msg={}",
            urlencoding::encode("Employee added successfully!")
        ))),
        Err(err) => {
            let message = err.user_message(
                "An error occurred. Please try again.",
                "Failed to add employee.",
            );
            Err(render_form(&api, session, form, message).await)
        }
    }
}

async fn render_form(
    api: &ApiClient,
    session: CurrentSession,
    form: EmployeeForm,
    error: String,
) -> Html<String> {
    // Office codes feed the dropdown; a failed fetch just leaves it empty
    let offices = api.list_offices().await.unwrap_or_default();

    let template = EmployeeFormTemplate {
        session,
        form,
        offices,
        error,
    };
    Html(template.render().unwrap())
}
