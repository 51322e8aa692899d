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
    models::{Item, StockLine},
    search::matches_term,
    utils::{first_missing, missing_field_message},
};

#[derive(Template)]
#[template(path = "inventory/list.html")]
struct StockTemplate {
    session: CurrentSession,
    stock: Vec<StockLine>,
    term: String,
    error: String,
    notice: String,
}

#[derive(Template)]
#[template(path = "inventory/item_form.html")]
struct ItemFormTemplate {
    session: CurrentSession,
    form: ItemForm,
    error: String,
}

#[derive(Template)]
#[template(path = "inventory/stock_form.html")]
struct StockFormTemplate {
    session: CurrentSession,
    form: StockForm,
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

/// New catalog entry; the write endpoint takes just the name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemForm {
    #[serde(rename = "Name", default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockForm {
    #[serde(rename = "Item", default)]
    pub item: String,
    #[serde(rename = "Quantity", default)]
    pub quantity: String,
}

/// JSON body of the add-stock endpoint; the office scope comes from the
/// session, not the form.
#[derive(Serialize)]
struct AddStockPayload {
    #[serde(rename = "OfficeId")]
    office_id: String,
    #[serde(rename = "Item")]
    item: String,
    #[serde(rename = "Quantity")]
    quantity: String,
}

/// Current stock at the session's office.
pub async fn stock_list(
    cookies: Cookies,
    State(api): State<ApiClient>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, Redirect> {
    let session = get_current_session(&cookies).ok_or_else(|| login_redirect("/inventory"))?;

    let mut error = String::new();
    let stock = match api.get_stock(&session.office_id).await {
        Ok(rows) => rows,
        Err(err) => {
            error = err.user_message(
                "Failed to fetch inventory data.",
                "Failed to fetch inventory data.",
            );
            Vec::new()
        }
    };

    let stock = stock
        .into_iter()
        .filter(|line| matches_term(&query.q, &[line.item.as_deref()]))
        .collect();

    let template = StockTemplate {
        session,
        stock,
        term: query.q,
        error,
        notice: query.msg,
    };
    Ok(Html(template.render().unwrap()))
}

pub async fn item_form(cookies: Cookies) -> Result<Html<String>, Redirect> {
    let session =
        get_current_session(&cookies).ok_or_else(|| login_redirect("/inventory/items/new"))?;

    Ok(render_item_form(session, ItemForm::default(), String::new()))
}

pub async fn create_item(
    cookies: Cookies,
    State(api): State<ApiClient>,
    Form(form): Form<ItemForm>,
) -> Result<Redirect, Html<String>> {
    let Some(session) = get_current_session(&cookies) else {
        return Ok(login_redirect("/inventory"));
    };

    if let Some(field) = first_missing(&[("Name", form.name.as_str())]) {
        return Err(render_item_form(session, form, missing_field_message(field)));
    }

    match api.add_item(&form.name).await {
        Ok(()) => Ok(Redirect::to(&format!(
            "/inventory?msg={}",
            urlencoding::encode("Item added successfully!")
        ))),
        Err(err) => {
            let message = err.user_message(
                "An error occurred. Please try again.",
                "Failed to add item.",
            );
            Err(render_item_form(session, form, message))
        }
    }
}

pub async fn stock_form(
    cookies: Cookies,
    State(api): State<ApiClient>,
) -> Result<Html<String>, Redirect> {
    let session =
        get_current_session(&cookies).ok_or_else(|| login_redirect("/inventory/stock/new"))?;

    Ok(render_stock_form(&api, session, StockForm::default(), String::new()).await)
}

pub async fn create_stock(
    cookies: Cookies,
    State(api): State<ApiClient>,
    Form(form): Form<StockForm>,
) -> Result<Redirect, Html<String>> {
    let Some(session) = get_current_session(&cookies) else {
        return Ok(login_redirect("/inventory"));
    };

    let required = [
        ("Item", form.item.as_str()),
        ("Quantity", form.quantity.as_str()),
    ];
    if let Some(field) = first_missing(&required) {
        return Err(render_stock_form(&api, session, form, missing_field_message(field)).await);
    }

    let payload = AddStockPayload {
        office_id: session.office_id.clone(),
        item: form.item.clone(),
        quantity: form.quantity.clone(),
    };

    match api.add_stock(&payload).await {
        Ok(()) => Ok(Redirect::to(&format!(
            "/inventory?msg={}",
            urlencoding::encode("Stock added successfully!")
        ))),
        Err(err) => {
            let message = err.user_message(
                "An error occurred. Please try again.",
                "Failed to add stock.",
            );
            Err(render_stock_form(&api, session, form, message).await)
        }
    }
}

fn render_item_form(session: CurrentSession, form: ItemForm, error: String) -> Html<String> {
    let template = ItemFormTemplate {
        session,
        form,
        error,
    };
    Html(template.render().unwrap())
}

async fn render_stock_form(
    api: &ApiClient,
    session: CurrentSession,
    form: StockForm,
    error: String,
) -> Html<String> {
    let items = api.list_items().await.unwrap_or_default();

    let template = StockFormTemplate {
        session,
        form,
        items,
        error,
    };
    Html(template.render().unwrap())
}
