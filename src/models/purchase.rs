use serde::Deserialize;

use super::{de_opt_amount, de_opt_quantity};

/// Grouping key used when the service returns a row without an invoice
/// number.
pub const UNKNOWN_INVOICE: &str = "Unknown Invoice";

/// Flat row as the read endpoint returns it: one row per purchase entry,
/// invoice header fields repeated on every row.
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseRow {
    #[serde(rename = "InvoiceNumber")]
    pub invoice_number: Option<String>,
    #[serde(rename = "VendorName")]
    pub vendor_name: Option<String>,
    #[serde(rename = "VendorAddress")]
    pub vendor_address: Option<String>,
    #[serde(rename = "Invoice")]
    pub invoice: Option<String>,
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Items", default)]
    pub items: Vec<PurchaseRowItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseRowItem {
    #[serde(rename = "Item")]
    pub item: Option<String>,
    #[serde(rename = "Quantity", deserialize_with = "de_opt_quantity", default)]
    pub quantity: Option<i64>,
    #[serde(rename = "Amount", deserialize_with = "de_opt_amount", default)]
    pub amount: Option<f64>,
}

/// One table row after grouping: the invoice header plus its line items.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseInvoice {
    pub invoice_number: String,
    pub vendor_name: String,
    pub vendor_address: String,
    pub invoice: String,
    pub date: String,
    pub items: Vec<PurchaseLineItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseLineItem {
    pub item: String,
    pub quantity: i64,
    pub amount: f64,
}

/// Reduces the flat rows into one invoice per `InvoiceNumber`, in first-seen
/// order. Rows without a number land under [`UNKNOWN_INVOICE`]; header fields
/// come from the first row of each group; missing line-item sub-fields
/// default to "No Item" / 0 / 0.
pub fn group_by_invoice(rows: Vec<PurchaseRow>) -> Vec<PurchaseInvoice> {
    let mut invoices: Vec<PurchaseInvoice> = Vec::new();

    for row in rows {
        let number = row
            .invoice_number
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| UNKNOWN_INVOICE.to_string());

        let position = invoices.iter().position(|inv| inv.invoice_number == number);
        let invoice = match position {
            Some(idx) => &mut invoices[idx],
            None => {
                invoices.push(PurchaseInvoice {
                    invoice_number: number,
                    vendor_name: row.vendor_name.unwrap_or_default(),
                    vendor_address: row.vendor_address.unwrap_or_default(),
                    invoice: row.invoice.unwrap_or_default(),
                    date: row.date.unwrap_or_default(),
                    items: Vec::new(),
                });
                invoices.last_mut().unwrap()
            }
        };

        for item in row.items {
            invoice.items.push(PurchaseLineItem {
                item: item.item.unwrap_or_else(|| "No Item".to_string()),
                quantity: item.quantity.unwrap_or(0),
                amount: item.amount.unwrap_or(0.0),
            });
        }
    }

    invoices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(invoice_number: Option<&str>, items: Vec<PurchaseRowItem>) -> PurchaseRow {
        PurchaseRow {
            invoice_number: invoice_number.map(str::to_string),
            vendor_name: Some("Acme Supplies".to_string()),
            vendor_address: Some("12 Market Rd".to_string()),
            invoice: Some("uploads/inv.jpg".to_string()),
            date: Some("2024-02-01".to_string()),
            items,
        }
    }

    fn line(item: Option<&str>, quantity: Option<i64>, amount: Option<f64>) -> PurchaseRowItem {
        PurchaseRowItem {
            item: item.map(str::to_string),
            quantity,
            amount,
        }
    }

    #[test]
    fn groups_rows_sharing_an_invoice_number() {
        let grouped = group_by_invoice(vec![
            row(Some("A"), vec![line(Some("x"), Some(1), Some(5.0))]),
            row(Some("A"), vec![line(Some("y"), Some(2), Some(3.0))]),
            row(None, vec![line(Some("z"), Some(1), Some(1.0))]),
        ]);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].invoice_number, "A");
        assert_eq!(grouped[0].items.len(), 2);
        assert_eq!(grouped[0].items[0].item, "x");
        assert_eq!(grouped[0].items[1].item, "y");
        assert_eq!(grouped[1].invoice_number, UNKNOWN_INVOICE);
        assert_eq!(grouped[1].items.len(), 1);
        assert_eq!(grouped[1].items[0].item, "z");
    }

    #[test]
    fn keeps_first_seen_order() {
        let grouped = group_by_invoice(vec![
            row(Some("B"), vec![]),
            row(Some("A"), vec![]),
            row(Some("B"), vec![]),
        ]);
        let numbers: Vec<&str> = grouped.iter().map(|i| i.invoice_number.as_str()).collect();
        assert_eq!(numbers, vec!["B", "A"]);
    }

    #[test]
    fn missing_line_item_fields_get_defaults() {
        let grouped = group_by_invoice(vec![row(Some("A"), vec![line(None, None, None)])]);
        assert_eq!(
            grouped[0].items[0],
            PurchaseLineItem {
                item: "No Item".to_string(),
                quantity: 0,
                amount: 0.0,
            }
        );
    }

    #[test]
    fn empty_string_invoice_number_falls_back_to_sentinel() {
        let grouped = group_by_invoice(vec![row(Some(""), vec![])]);
        assert_eq!(grouped[0].invoice_number, UNKNOWN_INVOICE);
    }

    #[test]
    fn empty_input_yields_no_invoices() {
        assert!(group_by_invoice(Vec::new()).is_empty());
    }
}
