use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::models::{
    Employee, IssuePayload, IssueRecord, Item, LoginData, Office, PurchaseRow, StockLine,
    TransferPayload,
};

/// Response envelope every remote endpoint wraps its payload in.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    pub message: Option<String>,
}

/// Failure of a single remote call. `Transport` covers request errors and
/// malformed responses; `Rejected` is the service answering `success: false`,
/// carrying its message when it sent one.
#[derive(Debug)]
pub enum ApiError {
    Transport,
    Rejected(Option<String>),
}

impl ApiError {
    /// Maps the error onto the message shown to the user. Server-provided
    /// messages are surfaced verbatim; `transport` and `fallback` are the
    /// caller's generic strings for the other two cases.
    pub fn user_message(&self, transport: &str, fallback: &str) -> String {
        match self {
            ApiError::Transport => transport.to_string(),
            ApiError::Rejected(Some(message)) => message.clone(),
            ApiError::Rejected(None) => fallback.to_string(),
        }
    }
}

/// Client for the remote inventory service. Cheap to clone, threaded through
/// the router as axum state.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(|e| {
                log::warn!("GET {} failed: {}", path, e);
                ApiError::Transport
            })?;

        let envelope: Envelope<Vec<T>> = response.json().await.map_err(|e| {
            log::warn!("GET {} returned malformed JSON: {}", path, e);
            ApiError::Transport
        })?;

        if envelope.success {
            Ok(envelope.data.unwrap_or_default())
        } else {
            Err(ApiError::Rejected(envelope.message))
        }
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                log::warn!("POST {} failed: {}", path, e);
                ApiError::Transport
            })?;

        let envelope: Envelope<serde_json::Value> = response.json().await.map_err(|e| {
            log::warn!("POST {} returned malformed JSON: {}", path, e);
            ApiError::Transport
        })?;

        if envelope.success {
            Ok(())
        } else {
            Err(ApiError::Rejected(envelope.message))
        }
    }

    async fn post_multipart(&self, path: &str, form: multipart::Form) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                log::warn!("POST {} failed: {}", path, e);
                ApiError::Transport
            })?;

        let envelope: Envelope<serde_json::Value> = response.json().await.map_err(|e| {
            log::warn!("POST {} returned malformed JSON: {}", path, e);
            ApiError::Transport
        })?;

        if envelope.success {
            Ok(())
        } else {
            Err(ApiError::Rejected(envelope.message))
        }
    }

    // --- Authentication ---

    pub async fn login(&self, admin_mail: &str, password: &str) -> Result<LoginData, ApiError> {
        let body = serde_json::json!({
            "AdminMail": admin_mail,
            "Password": password,
        });

        let response = self
            .client
            .post(self.url("offices/login.php"))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                log::warn!("POST offices/login.php failed: {}", e);
                ApiError::Transport
            })?;

        let envelope: Envelope<LoginData> = response.json().await.map_err(|e| {
            log::warn!("POST offices/login.php returned malformed JSON: {}", e);
            ApiError::Transport
        })?;

        match (envelope.success, envelope.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(ApiError::Rejected(envelope.message)),
            (false, _) => Err(ApiError::Rejected(envelope.message)),
        }
    }

    // --- Offices ---

    pub async fn list_offices(&self) -> Result<Vec<Office>, ApiError> {
        self.fetch_list("offices/get_offices.php", &[]).await
    }

    pub async fn add_office<B: Serialize>(&self, office: &B) -> Result<(), ApiError> {
        self.post_json("offices/add_offices.php", office).await
    }

    // --- Employees ---

    pub async fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.fetch_list("employees/get_employees.php", &[]).await
    }

    pub async fn add_employee<B: Serialize>(&self, employee: &B) -> Result<(), ApiError> {
        self.post_json("employees/add_employees.php", employee).await
    }

    // --- Item catalog and stock ---

    pub async fn list_items(&self) -> Result<Vec<Item>, ApiError> {
        self.fetch_list("item/get_item.php", &[]).await
    }

    pub async fn add_item(&self, name: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "Name": name });
        self.post_json("item/add_item.php", &body).await
    }

    pub async fn get_stock(&self, office_id: &str) -> Result<Vec<StockLine>, ApiError> {
        self.fetch_list("stock/get_stock.php", &[("OfficeId", office_id)])
            .await
    }

    pub async fn add_stock<B: Serialize>(&self, stock: &B) -> Result<(), ApiError> {
        self.post_json("stock/add_stock.php", stock).await
    }

    // --- Issued items ---

    pub async fn get_issue(&self, office_id: &str) -> Result<Vec<IssueRecord>, ApiError> {
        self.fetch_list("issue/get_issue.php", &[("OfficeID", office_id)])
            .await
    }

    pub async fn issue_items(&self, payload: &IssuePayload) -> Result<(), ApiError> {
        self.post_json("issue/issue_item.php", payload).await
    }

    // --- Purchases ---

    pub async fn get_purchases(&self, office_id: &str) -> Result<Vec<PurchaseRow>, ApiError> {
        self.fetch_list("purchase/get_purchase.php", &[("OfficeID", office_id)])
            .await
    }

    pub async fn purchase_items(&self, form: multipart::Form) -> Result<(), ApiError> {
        self.post_multipart("purchase/purchase_item.php", form).await
    }

    // --- Transfers ---

    pub async fn stock_transfer(&self, payload: &TransferPayload) -> Result<(), ApiError> {
        self.post_json("transfer/stock_transfer.php", payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_decodes_success_with_data() {
        let raw = r#"{"success": true, "data": [{"Name": "Stapler"}]}"#;
        let envelope: Envelope<Vec<Item>> = serde_json::from_str(raw).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data.unwrap().len(), 1);
        assert!(envelope.message.is_none());
    }

    #[test]
    fn envelope_decodes_failure_with_message() {
        let raw = r#"{"success": false, "message": "Duplicate entry"}"#;
        let envelope: Envelope<Vec<Item>> = serde_json::from_str(raw).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.message.as_deref(), Some("Duplicate entry"));
    }

    #[test]
    fn envelope_missing_success_flag_counts_as_failure() {
        let raw = r#"{"message": "nope"}"#;
        let envelope: Envelope<Vec<Item>> = serde_json::from_str(raw).unwrap();
        assert!(!envelope.success);
    }

    #[test]
    fn user_message_prefers_server_text() {
        let err = ApiError::Rejected(Some("Stock exhausted".to_string()));
        assert_eq!(
            err.user_message("try again", "failed"),
            "Stock exhausted"
        );
    }

    #[test]
    fn user_message_falls_back_per_case() {
        assert_eq!(
            ApiError::Transport.user_message("try again", "failed"),
            "try again"
        );
        assert_eq!(
            ApiError::Rejected(None).user_message("try again", "failed"),
            "failed"
        );
    }
}
