use serde::{Deserialize, Serialize};

use super::de_quantity;

/// One row per (employee, item) issuance, as returned by the read endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueRecord {
    #[serde(rename = "OfficeCode")]
    pub office_code: Option<String>,
    #[serde(rename = "EmpID")]
    pub emp_id: Option<String>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Item")]
    pub item: Option<String>,
    #[serde(rename = "Quantity", deserialize_with = "de_quantity", default)]
    pub quantity: i64,
    #[serde(rename = "DateTime")]
    pub date_time: Option<String>,
}

impl IssueRecord {
    pub fn office_code(&self) -> &str {
        self.office_code.as_deref().unwrap_or("")
    }

    pub fn emp_id(&self) -> &str {
        self.emp_id.as_deref().unwrap_or("")
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn item(&self) -> &str {
        self.item.as_deref().unwrap_or("")
    }

    pub fn date_time(&self) -> &str {
        self.date_time.as_deref().unwrap_or("")
    }
}

/// Write shape of the issue endpoint. Quantities stay as the entered text;
/// the service parses them on its side.
#[derive(Debug, Serialize)]
pub struct IssuePayload {
    #[serde(rename = "EmpId")]
    pub emp_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "OfficeID")]
    pub office_id: String,
    #[serde(rename = "OfficeCode")]
    pub office_code: String,
    #[serde(rename = "Items")]
    pub items: Vec<IssueLine>,
}

#[derive(Debug, Serialize)]
pub struct IssueLine {
    #[serde(rename = "Item")]
    pub item: String,
    #[serde(rename = "Quantity")]
    pub quantity: String,
}
