mod api;
mod handlers;
mod middleware;
mod models;
mod search;
mod utils;

use axum::{
    extract::DefaultBodyLimit,
    response::Redirect,
    routing::{get, post},
    Router,
};
use dotenvy::dotenv;
use std::env;
use tower::ServiceBuilder;
use tower_cookies::CookieManagerLayer;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use api::ApiClient;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    env_logger::init();

    // The remote inventory service every data operation is proxied to
    let api_base = env::var("STOCK_API_BASE")
        .unwrap_or_else(|_| "https://namami-infotech.com/SatyaMicro/src".to_string());

    let api = ApiClient::new(api_base);

    // Build the application router
    let app = create_router(api);

    // Get port from environment or use default
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);

    println!("🚀 Stockdesk server starting on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

fn create_router(api: ApiClient) -> Router {
    Router::new()
        // Public routes (no authentication required)
        .route("/", get(|| async { Redirect::permanent("/login") }))
        .route("/login", get(handlers::auth::login_page))
        .route("/login", post(handlers::auth::login))
        .route("/register", get(handlers::auth::register_page))
        .route("/register", post(handlers::auth::register))
        .route("/logout", post(handlers::auth::logout))

        // Protected routes (session cookie required)
        .route("/dashboard", get(handlers::dashboard))

        // Inventory: current stock plus the item catalog
        .route("/inventory", get(handlers::inventory::stock_list))
        .route("/inventory/items/new", get(handlers::inventory::item_form))
        .route("/inventory/items", post(handlers::inventory::create_item))
        .route("/inventory/stock/new", get(handlers::inventory::stock_form))
        .route("/inventory/stock", post(handlers::inventory::create_stock))

        // Employees
        .route("/employees", get(handlers::employees::employees_list))
        .route("/employees/new", get(handlers::employees::employee_form))
        .route("/employees", post(handlers::employees::create_employee))

        // Offices
        .route("/offices", get(handlers::offices::offices_list))
        .route("/offices/new", get(handlers::offices::office_form))
        .route("/offices", post(handlers::offices::create_office))

        // Issued items
        .route("/issue", get(handlers::issue::issue_list))
        .route("/issue/new", get(handlers::issue::issue_form))
        .route("/issue", post(handlers::issue::save_issue))

        // Purchases (invoice image upload, so the form posts multipart)
        .route("/purchase", get(handlers::purchase::purchase_list))
        .route("/purchase/new", get(handlers::purchase::purchase_form))
        .route("/purchase", post(handlers::purchase::save_purchase))

        // Stock transfers between offices
        .route("/transfer", get(handlers::transfer::transfer_list))
        .route("/transfer/new", get(handlers::transfer::transfer_form))
        .route("/transfer", post(handlers::transfer::save_transfer))

        // Static files
        .nest_service("/static", ServeDir::new("static"))

        // Unmatched paths render the not-found view
        .fallback(handlers::not_found)

        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CookieManagerLayer::new())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(10 * 1024 * 1024)) // 10MB
        )
        .with_state(api)
}
