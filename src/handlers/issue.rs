use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
};
use axum_extra::extract::Form;
use serde::Deserialize;
use tower_cookies::Cookies;

use crate::{
    api::ApiClient,
    middleware::{get_current_session, login_redirect, CurrentSession},
    models::{
        add_row, all_complete, remove_row, Employee, IssueLine, IssuePayload, IssueRecord, Item,
        LineRow, RowAction,
    },
    search::matches_term,
    utils::{first_missing, missing_field_message},
};

#[derive(Template)]
#[template(path = "issue/list.html")]
struct IssueListTemplate {
    session: CurrentSession,
    records: Vec<IssueRecord>,
    term: String,
    error: String,
    notice: String,
}

#[derive(Template)]
#[template(path = "issue/form.html")]
struct IssueFormTemplate {
    session: CurrentSession,
    form: IssueDraft,
    employees: Vec<Employee>,
    items: Vec<Item>,
    error: String,
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    q: String,
    #[serde(default)]
    msg: String,
}

/// Draft of one issuance: the employee plus at least one item row.
#[derive(Debug, Clone)]
pub struct IssueDraft {
    pub emp_id: String,
    pub name: String,
    pub rows: Vec<LineRow>,
}

impl Default for IssueDraft {
    fn default() -> Self {
        Self {
            emp_id: String::new(),
            name: String::new(),
            rows: vec![LineRow::default()],
        }
    }
}

/// Posted form body. Repeated `Item`/`Quantity` inputs arrive as parallel
/// vectors and are zipped back into row pairs straight away.
#[derive(Debug, Deserialize)]
pub struct IssueFormBody {
    #[serde(rename = "EmpId", default)]
    emp_id: String,
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(default)]
    action: String,
    #[serde(rename = "Item", default)]
    items: Vec<String>,
    #[serde(rename = "Quantity", default)]
    quantities: Vec<String>,
}

impl IssueFormBody {
    fn into_draft(self) -> (IssueDraft, RowAction) {
        let mut rows: Vec<LineRow> = self
            .items
            .into_iter()
            .zip(self.quantities)
            .map(|(item, quantity)| LineRow { item, quantity })
            .collect();
        if rows.is_empty() {
            rows.push(LineRow::default());
        }

        let draft = IssueDraft {
            emp_id: self.emp_id,
            name: self.name,
            rows,
        };
        (draft, RowAction::parse(&self.action))
    }
}

pub async fn issue_list(
    cookies: Cookies,
    State(api): State<ApiClient>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, Redirect> {
    let session = get_current_session(&cookies).ok_or_else(|| login_redirect("/issue"))?;

    let mut error = String::new();
    let records = match api.get_issue(&session.office_id).await {
        Ok(rows) => rows,
        Err(err) => {
            error = err.user_message(
                "Failed to fetch issue data.",
                "Failed to fetch issue data.",
            );
            Vec::new()
        }
    };

    let records = records
        .into_iter()
        .filter(|r| matches_term(&query.q, &[r.item.as_deref()]))
        .collect();

    let template = IssueListTemplate {
        session,
        records,
        term: query.q,
        error,
        notice: query.msg,
    };
    Ok(Html(template.render().unwrap()))
}

pub async fn issue_form(
    cookies: Cookies,
    State(api): State<ApiClient>,
) -> Result<Html<String>, Redirect> {
    let session = get_current_session(&cookies).ok_or_else(|| login_redirect("/issue/new"))?;

    Ok(render_form(&api, session, IssueDraft::default(), String::new()).await)
}

pub async fn save_issue(
    cookies: Cookies,
    State(api): State<ApiClient>,
    Form(body): Form<IssueFormBody>,
) -> Result<Redirect, Html<String>> {
    let Some(session) = get_current_session(&cookies) else {
        return Ok(login_redirect("/issue"));
    };

    let (mut draft, action) = body.into_draft();

    match action {
        RowAction::Add => {
            add_row(&mut draft.rows);
            Err(render_form(&api, session, draft, String::new()).await)
        }
        RowAction::Remove(index) => {
            remove_row(&mut draft.rows, index);
            Err(render_form(&api, session, draft, String::new()).await)
        }
        RowAction::Submit => {
            // Fill the name in from the employee list when only the id was
            // picked, the way the original dialog cross-filled the fields
            if draft.name.trim().is_empty() {
                let employees = api.list_employees().await.unwrap_or_default();
                if let Some(emp) = employees
                    .iter()
                    .find(|e| e.emp_id.as_deref() == Some(draft.emp_id.trim()))
                {
                    draft.name = emp.name().to_string();
                }
            }

            let required = [
                ("EmpId", draft.emp_id.as_str()),
                ("Name", draft.name.as_str()),
            ];
            if let Some(field) = first_missing(&required) {
                return Err(render_form(&api, session, draft, missing_field_message(field)).await);
            }
            if !all_complete(&draft.rows) {
                return Err(render_form(
                    &api,
                    session,
                    draft,
                    "All fields are required".to_string(),
                )
                .await);
            }

            let payload = IssuePayload {
                emp_id: draft.emp_id.clone(),
                name: draft.name.clone(),
                office_id: session.office_id.clone(),
                office_code: session.office_code.clone(),
                items: draft
                    .rows
                    .iter()
                    .map(|row| IssueLine {
                        item: row.item.clone(),
                        quantity: row.quantity.clone(),
                    })
                    .collect(),
            };

            match api.issue_items(&payload).await {
                Ok(()) => Ok(Redirect::to(&format!(
                    "/issue?msg={}",
                    urlencoding::encode("Items issued successfully")
                ))),
                Err(err) => {
                    let message = err.user_message(
                        "An error occurred while issuing the items",
                        "Failed to issue items",
                    );
                    Err(render_form(&api, session, draft, message).await)
                }
            }
        }
    }
}

async fn render_form(
    api: &ApiClient,
    session: CurrentSession,
    form: IssueDraft,
    error: String,
) -> Html<String> {
    let employees = api.list_employees().await.unwrap_or_default();
    let items = api.list_items().await.unwrap_or_default();

    let template = IssueFormTemplate {
        session,
        form,
        employees,
        items,
        error,
    };
    Html(template.render().unwrap())
}
