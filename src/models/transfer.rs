use serde::Serialize;

use super::LineRow;

/// Write shape of the transfer endpoint. The service wants positionally
/// correlated `Item[]` / `Quantity[]` arrays; drafts keep `{item, quantity}`
/// pairs and only split here, so both arrays always line up.
#[derive(Debug, Serialize)]
pub struct TransferPayload {
    #[serde(rename = "FromOfficeID")]
    pub from_office_id: String,
    #[serde(rename = "ToOfficeID")]
    pub to_office_id: String,
    #[serde(rename = "ModeOfTransfer")]
    pub mode_of_transfer: String,
    #[serde(rename = "EmpId")]
    pub emp_id: String,
    #[serde(rename = "CourierName", skip_serializing_if = "Option::is_none")]
    pub courier_name: Option<String>,
    #[serde(rename = "DocketNumber", skip_serializing_if = "Option::is_none")]
    pub docket_number: Option<String>,
    #[serde(rename = "CourierDate", skip_serializing_if = "Option::is_none")]
    pub courier_date: Option<String>,
    #[serde(rename = "Item")]
    pub items: Vec<String>,
    #[serde(rename = "Quantity")]
    pub quantities: Vec<i64>,
}

impl TransferPayload {
    pub fn from_rows(
        from_office_id: String,
        to_office_id: String,
        mode_of_transfer: String,
        emp_id: String,
        rows: &[LineRow],
    ) -> Self {
        Self {
            from_office_id,
            to_office_id,
            mode_of_transfer,
            emp_id,
            courier_name: None,
            docket_number: None,
            courier_date: None,
            items: rows.iter().map(|r| r.item.clone()).collect(),
            quantities: rows
                .iter()
                .map(|r| r.quantity.trim().parse().unwrap_or(0))
                .collect(),
        }
    }

    pub fn with_courier(
        mut self,
        courier_name: String,
        docket_number: String,
        courier_date: String,
    ) -> Self {
        self.courier_name = (!courier_name.is_empty()).then_some(courier_name);
        self.docket_number = (!docket_number.is_empty()).then_some(docket_number);
        self.courier_date = (!courier_date.is_empty()).then_some(courier_date);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<LineRow> {
        vec![
            LineRow {
                item: "3".to_string(),
                quantity: "2".to_string(),
            },
            LineRow {
                item: "7".to_string(),
                quantity: "5".to_string(),
            },
        ]
    }

    #[test]
    fn arrays_stay_positionally_correlated() {
        let payload = TransferPayload::from_rows(
            "1".to_string(),
            "4".to_string(),
            "Courier".to_string(),
            "E-11".to_string(),
            &rows(),
        );
        assert_eq!(payload.items, vec!["3", "7"]);
        assert_eq!(payload.quantities, vec![2, 5]);
        assert_eq!(payload.items.len(), payload.quantities.len());
    }

    #[test]
    fn serializes_with_the_wire_field_names() {
        let payload = TransferPayload::from_rows(
            "1".to_string(),
            "4".to_string(),
            "Courier".to_string(),
            "E-11".to_string(),
            &rows(),
        );
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["FromOfficeID"], "1");
        assert_eq!(json["Item"][1], "7");
        assert_eq!(json["Quantity"][1], 5);
        assert!(json.get("CourierName").is_none());
    }

    #[test]
    fn courier_fields_are_forwarded_only_when_present() {
        let payload = TransferPayload::from_rows(
            "1".to_string(),
            "4".to_string(),
            "Courier".to_string(),
            "E-11".to_string(),
            &rows(),
        )
        .with_courier("BlueDart".to_string(), String::new(), "2024-02-01".to_string());

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["CourierName"], "BlueDart");
        assert!(json.get("DocketNumber").is_none());
        assert_eq!(json["CourierDate"], "2024-02-01");
    }
}
