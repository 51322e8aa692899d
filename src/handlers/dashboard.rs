use askama::Template;
use axum::{
    extract::State,
    response::{Html, Redirect},
};
use tower_cookies::Cookies;

use crate::{
    api::ApiClient,
    middleware::{get_current_session, login_redirect, CurrentSession},
};

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    session: CurrentSession,
    product_count: usize,
    office_count: usize,
    stock_line_count: usize,
}

pub async fn dashboard(
    cookies: Cookies,
    State(api): State<ApiClient>,
) -> Result<Html<String>, Redirect> {
    let session = get_current_session(&cookies).ok_or_else(|| login_redirect("/dashboard"))?;

    // Overview counts; a failed fetch just shows zero
    let product_count = api.list_items().await.map(|v| v.len()).unwrap_or(0);
    let office_count = api.list_offices().await.map(|v| v.len()).unwrap_or(0);
    let stock_line_count = api
        .get_stock(&session.office_id)
        .await
        .map(|v| v.len())
        .unwrap_or(0);

    let template = DashboardTemplate {
        session,
        product_count,
        office_count,
        stock_line_count,
    };
    Ok(Html(template.render().unwrap()))
}
