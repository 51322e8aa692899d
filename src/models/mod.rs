pub mod employee;
pub mod issue;
pub mod office;
pub mod purchase;
pub mod rows;
pub mod stock;
pub mod transfer;

// Re-export only the types we actually use
pub use employee::Employee;
pub use issue::{IssueLine, IssuePayload, IssueRecord};
pub use office::{LoginData, Office};
pub use purchase::{group_by_invoice, PurchaseInvoice, PurchaseRow};
pub use rows::{add_row, all_complete, remove_row, LineRow, PurchaseLineRow, RowAction};
pub use stock::{Item, StockLine};
pub use transfer::TransferPayload;

use serde::{Deserialize, Deserializer};

/// The remote service is a PHP/MySQL stack and serializes numeric columns as
/// either numbers or strings depending on the endpoint. Quantities and
/// amounts are decoded leniently; anything unparseable counts as absent.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Int(i64),
    Float(f64),
    Text(String),
}

pub(crate) fn de_quantity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<NumberOrText> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrText::Int(n)) => n,
        Some(NumberOrText::Float(f)) => f as i64,
        Some(NumberOrText::Text(s)) => s.trim().parse().unwrap_or(0),
        None => 0,
    })
}

pub(crate) fn de_opt_quantity<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<NumberOrText> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrText::Int(n)) => Some(n),
        Some(NumberOrText::Float(f)) => Some(f as i64),
        Some(NumberOrText::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

pub(crate) fn de_opt_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<NumberOrText> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrText::Int(n)) => Some(n as f64),
        Some(NumberOrText::Float(f)) => Some(f),
        Some(NumberOrText::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Line {
        #[serde(deserialize_with = "de_quantity", default)]
        quantity: i64,
        #[serde(deserialize_with = "de_opt_amount", default)]
        amount: Option<f64>,
    }

    #[test]
    fn quantity_decodes_from_number_and_string() {
        let a: Line = serde_json::from_str(r#"{"quantity": 7}"#).unwrap();
        let b: Line = serde_json::from_str(r#"{"quantity": "7"}"#).unwrap();
        assert_eq!(a.quantity, 7);
        assert_eq!(b.quantity, 7);
    }

    #[test]
    fn unparseable_or_null_quantity_is_zero() {
        let a: Line = serde_json::from_str(r#"{"quantity": "seven"}"#).unwrap();
        let b: Line = serde_json::from_str(r#"{"quantity": null}"#).unwrap();
        assert_eq!(a.quantity, 0);
        assert_eq!(b.quantity, 0);
    }

    #[test]
    fn amount_decodes_from_either_shape() {
        let a: Line = serde_json::from_str(r#"{"quantity": 1, "amount": "12.50"}"#).unwrap();
        let b: Line = serde_json::from_str(r#"{"quantity": 1, "amount": 12.5}"#).unwrap();
        assert_eq!(a.amount, Some(12.5));
        assert_eq!(b.amount, Some(12.5));
    }
}
