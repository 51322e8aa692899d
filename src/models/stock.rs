use serde::Deserialize;

use super::de_quantity;

/// Catalog entry. `Name` is the identifier the other records refer to;
/// the numeric `ID` only matters for the transfer endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    #[serde(rename = "ID")]
    pub id: Option<String>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
}

impl Item {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// Current quantity of an item at one office. Never edited directly in this
/// UI; additions come in through the add-stock form.
#[derive(Debug, Clone, Deserialize)]
pub struct StockLine {
    #[serde(rename = "OfficeId")]
    pub office_id: Option<String>,
    #[serde(rename = "Item")]
    pub item: Option<String>,
    #[serde(rename = "Quantity", deserialize_with = "de_quantity", default)]
    pub quantity: i64,
    #[serde(rename = "UpdateDateTime")]
    pub update_date_time: Option<String>,
}

impl StockLine {
    pub fn item(&self) -> &str {
        self.item.as_deref().unwrap_or("")
    }

    pub fn update_date_time(&self) -> &str {
        self.update_date_time.as_deref().unwrap_or("")
    }
}
