use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
};
use axum_extra::extract::Multipart;
use chrono::Utc;
use serde::Deserialize;
use tower_cookies::Cookies;

use crate::{
    api::ApiClient,
    middleware::{get_current_session, login_redirect, CurrentSession},
    models::{
        add_row, all_complete, group_by_invoice, remove_row, Item, PurchaseInvoice,
        PurchaseLineRow, RowAction,
    },
    search::matches_term,
    utils::{first_missing, missing_field_message},
};

#[derive(Template)]
#[template(path = "purchase/list.html")]
struct PurchaseListTemplate {
    session: CurrentSession,
    invoices: Vec<PurchaseInvoice>,
    term: String,
    error: String,
    notice: String,
}

#[derive(Template)]
#[template(path = "purchase/form.html")]
struct PurchaseFormTemplate {
    session: CurrentSession,
    form: PurchaseDraft,
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

/// Draft of one purchase invoice. The uploaded image is carried separately
/// since a browser never refills a file input on re-render.
#[derive(Debug, Clone)]
pub struct PurchaseDraft {
    pub vendor_name: String,
    pub vendor_address: String,
    pub invoice_number: String,
    pub date: String,
    pub rows: Vec<PurchaseLineRow>,
}

impl Default for PurchaseDraft {
    fn default() -> Self {
        Self {
            vendor_name: String::new(),
            vendor_address: String::new(),
            invoice_number: String::new(),
            date: Utc::now().format("%Y-%m-%d").to_string(),
            rows: vec![PurchaseLineRow::default()],
        }
    }
}

struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    data: Vec<u8>,
}

pub async fn purchase_list(
    cookies: Cookies,
    State(api): State<ApiClient>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, Redirect> {
    let session = get_current_session(&cookies).ok_or_else(|| login_redirect("/purchase"))?;

    let mut error = String::new();
    let rows = match api.get_purchases(&session.office_id).await {
        Ok(rows) => rows,
        Err(err) => {
            error = err.user_message(
                "Failed to fetch purchase data.",
                "Failed to fetch purchase data.",
            );
            Vec::new()
        }
    };

    // One table row per invoice, reconstructed from the flat rows
    let invoices = group_by_invoice(rows)
        .into_iter()
        .filter(|inv| {
            matches_term(
                &query.q,
                &[Some(inv.invoice_number.as_str()), Some(inv.vendor_name.as_str())],
            )
        })
        .collect();

    let template = PurchaseListTemplate {
        session,
        invoices,
        term: query.q,
        error,
        notice: query.msg,
    };
    Ok(Html(template.render().unwrap()))
}

pub async fn purchase_form(
    cookies: Cookies,
    State(api): State<ApiClient>,
) -> Result<Html<String>, Redirect> {
    let session = get_current_session(&cookies).ok_or_else(|| login_redirect("/purchase/new"))?;

    Ok(render_form(&api, session, PurchaseDraft::default(), String::new()).await)
}

pub async fn save_purchase(
    cookies: Cookies,
    State(api): State<ApiClient>,
    multipart: Multipart,
) -> Result<Redirect, Html<String>> {
    let Some(session) = get_current_session(&cookies) else {
        return Ok(login_redirect("/purchase"));
    };

    let (mut draft, file, action) = match parse_body(multipart).await {
        Ok(parsed) => parsed,
        Err(_) => {
            return Err(render_form(
                &api,
                session,
                PurchaseDraft::default(),
                "An error occurred. Please try again.".to_string(),
            )
            .await);
        }
    };

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
                ("VendorName", draft.vendor_name.as_str()),
                ("VendorAddress", draft.vendor_address.as_str()),
                ("InvoiceNumber", draft.invoice_number.as_str()),
            ];
            if let Some(field) = first_missing(&required) {
                return Err(render_form(&api, session, draft, missing_field_message(field)).await);
            }
            let Some(file) = file else {
                return Err(
                    render_form(&api, session, draft, missing_field_message("Invoice")).await,
                );
            };
            if !all_complete(&draft.rows) {
                return Err(render_form(
                    &api,
                    session,
                    draft,
                    "All fields are required".to_string(),
                )
                .await);
            }

            let form = build_wire_form(&draft, &file, &session.office_id);
            match api.purchase_items(form).await {
                Ok(()) => Ok(Redirect::to(&format!(
                    "/purchase?msg={}",
                    urlencoding::encode("Purchase recorded successfully!")
                ))),
                Err(err) => {
                    let message = err.user_message(
                        "An error occurred while processing the purchase",
                        "Failed to record purchase",
                    );
                    Err(render_form(&api, session, draft, message).await)
                }
            }
        }
    }
}

/// Collects the multipart fields into the draft, the uploaded image and the
/// requested action. `Item`/`Quantity`/`Amount` repeat once per row.
async fn parse_body(
    mut multipart: Multipart,
) -> Result<(PurchaseDraft, Option<UploadedFile>, RowAction), axum_extra::extract::multipart::MultipartError>
{
    let mut draft = PurchaseDraft {
        rows: Vec::new(),
        ..PurchaseDraft::default()
    };
    let mut file = None;
    let mut action = String::new();
    let mut items = Vec::new();
    let mut quantities = Vec::new();
    let mut amounts = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "VendorName" => draft.vendor_name = field.text().await?,
            "VendorAddress" => draft.vendor_address = field.text().await?,
            "InvoiceNumber" => draft.invoice_number = field.text().await?,
            "Date" => draft.date = field.text().await?,
            "action" => action = field.text().await?,
            "Item" => items.push(field.text().await?),
            "Quantity" => quantities.push(field.text().await?),
            "Amount" => amounts.push(field.text().await?),
            "Invoice" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;
                if !file_name.is_empty() && !data.is_empty() {
                    file = Some(UploadedFile {
                        file_name,
                        content_type,
                        data: data.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    draft.rows = items
        .into_iter()
        .zip(quantities)
        .zip(amounts)
        .map(|((item, quantity), amount)| PurchaseLineRow {
            item,
            quantity,
            amount,
        })
        .collect();
    if draft.rows.is_empty() {
        draft.rows.push(PurchaseLineRow::default());
    }

    Ok((draft, file, RowAction::parse(&action)))
}

/// Multipart body of the write endpoint, with the service's PHP-style
/// `Item[]` array field names.
fn build_wire_form(
    draft: &PurchaseDraft,
    file: &UploadedFile,
    office_id: &str,
) -> reqwest::multipart::Form {
    let mut part = reqwest::multipart::Part::bytes(file.data.clone())
        .file_name(file.file_name.clone());
    if let Some(content_type) = &file.content_type {
        if let Ok(typed) = reqwest::multipart::Part::bytes(file.data.clone())
            .file_name(file.file_name.clone())
            .mime_str(content_type)
        {
            part = typed;
        }
    }

    let mut form = reqwest::multipart::Form::new()
        .text("VendorName", draft.vendor_name.clone())
        .text("VendorAddress", draft.vendor_address.clone())
        .text("InvoiceNumber", draft.invoice_number.clone())
        .part("Invoice", part)
        .text("Date", draft.date.clone())
        .text("OfficeId", office_id.to_string());

    for row in &draft.rows {
        form = form
            .text("Item[]", row.item.clone())
            .text("Quantity[]", row.quantity.clone())
            .text("Amount[]", row.amount.clone());
    }

    form
}

async fn render_form(
    api: &ApiClient,
    session: CurrentSession,
    form: PurchaseDraft,
    error: String,
) -> Html<String> {
    let items = api.list_items().await.unwrap_or_default();

    let template = PurchaseFormTemplate {
        session,
        form,
        items,
        error,
    };
    Html(template.render().unwrap())
}
