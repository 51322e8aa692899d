use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
};
use axum_extra::extract::Form;
use chrono::Utc;
use serde::Deserialize;
use tower_cookies::Cookies;

use crate::{
    api::ApiClient,
    middleware::{get_current_session, login_redirect, CurrentSession},
    models::{
        add_row, all_complete, remove_row, Employee, Item, LineRow, Office, RowAction,
        TransferPayload,
    },
    search::matches_term,
    utils::{first_missing, missing_field_message},
};

#[derive(Template)]
#[template(path = "transfer/list.html")]
struct TransferListTemplate {
    session: CurrentSession,
    offices: Vec<Office>,
    term: String,
    error: String,
    notice: String,
}

#[derive(Template)]
#[template(path = "transfer/form.html")]
struct TransferFormTemplate {
    session: CurrentSession,
    form: TransferDraft,
    offices: Vec<Office>,
    items: Vec<Item>,
    employees: Vec<Employee>,
    error: String,
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    q: String,
    #[serde(default)]
    msg: String,
}

/// Draft of one transfer. Rows stay `{item, quantity}` pairs; the parallel
/// arrays the wire wants are produced by [`TransferPayload::from_rows`].
#[derive(Debug, Clone)]
pub struct TransferDraft {
    pub to_office_id: String,
    pub mode_of_transfer: String,
    pub emp_id: String,
    pub courier_name: String,
    pub docket_number: String,
    pub courier_date: String,
    pub rows: Vec<LineRow>,
}

impl Default for TransferDraft {
    fn default() -> Self {
        Self {
            to_office_id: String::new(),
            mode_of_transfer: String::new(),
            emp_id: String::new(),
            courier_name: String::new(),
            docket_number: String::new(),
            courier_date: Utc::now().format("%Y-%m-%d").to_string(),
            rows: vec![LineRow::default()],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TransferFormBody {
    #[serde(rename = "ToOfficeID", default)]
    to_office_id: String,
    #[serde(rename = "ModeOfTransfer", default)]
    mode_of_transfer: String,
    #[serde(rename = "EmpId", default)]
    emp_id: String,
    #[serde(rename = "CourierName", default)]
    courier_name: String,
    #[serde(rename = "DocketNumber", default)]
    docket_number: String,
    #[serde(rename = "CourierDate", default)]
    courier_date: String,
    #[serde(default)]
    action: String,
    #[serde(rename = "Item", default)]
    items: Vec<String>,
    #[serde(rename = "Quantity", default)]
    quantities: Vec<String>,
}

impl TransferFormBody {
    fn into_draft(self) -> (TransferDraft, RowAction) {
        let mut rows: Vec<LineRow> = self
            .items
            .into_iter()
            .zip(self.quantities)
            .map(|(item, quantity)| LineRow { item, quantity })
            .collect();
        if rows.is_empty() {
            rows.push(LineRow::default());
        }

        let draft = TransferDraft {
            to_office_id: self.to_office_id,
            mode_of_transfer: self.mode_of_transfer,
            emp_id: self.emp_id,
            courier_name: self.courier_name,
            docket_number: self.docket_number,
            courier_date: self.courier_date,
            rows,
        };
        (draft, RowAction::parse(&self.action))
    }
}

/// The transfer screen lists the offices stock can move between.
pub async fn transfer_list(
    cookies: Cookies,
    State(api): State<ApiClient>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, Redirect> {
    let session = get_current_session(&cookies).ok_or_else(|| login_redirect("/transfer"))?;

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
        .filter(|o| matches_term(&query.q, &[o.office_name.as_deref()]))
        .collect();

    let template = TransferListTemplate {
        session,
        offices,
        term: query.q,
        error,
        notice: query.msg,
    };
    Ok(Html(template.render().unwrap()))
}

pub async fn transfer_form(
    cookies: Cookies,
    State(api): State<ApiClient>,
) -> Result<Html<String>, Redirect> {
    let session = get_current_session(&cookies).ok_or_else(|| login_redirect("/transfer/new"))?;

    Ok(render_form(&api, session, TransferDraft::default(), String::new()).await)
}

pub async fn save_transfer(
    cookies: Cookies,
    State(api): State<ApiClient>,
    Form(body): Form<TransferFormBody>,
) -> Result<Redirect, Html<String>> {
    let Some(session) = get_current_session(&cookies) else {
        return Ok(login_redirect("/transfer"));
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
            let required = [
                ("ToOfficeID", draft.to_office_id.as_str()),
                ("ModeOfTransfer", draft.mode_of_transfer.as_str()),
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

            let payload = TransferPayload::from_rows(
                session.office_id.clone(),
                draft.to_office_id.clone(),
                draft.mode_of_transfer.clone(),
                draft.emp_id.clone(),
                &draft.rows,
            )
            .with_courier(
                draft.courier_name.clone(),
                draft.docket_number.clone(),
                draft.courier_date.clone(),
            );

            match api.stock_transfer(&payload).await {
                Ok(()) => Ok(Redirect::to(&format!(
                    "/transfer?msg={}",
                    urlencoding::encode("Transfer recorded successfully!")
                ))),
                Err(err) => {
                    let message = err.user_message(
                        "An error occurred while processing the transfer",
                        "Failed to record transfer",
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
    form: TransferDraft,
    error: String,
) -> Html<String> {
    let offices = api.list_offices().await.unwrap_or_default();
    let items = api.list_items().await.unwrap_or_default();
    let employees = api.list_employees().await.unwrap_or_default();

    let template = TransferFormTemplate {
        session,
        form,
        offices,
        items,
        employees,
        error,
    };
    Html(template.render().unwrap())
}
