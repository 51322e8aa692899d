//! Line-item row drafts shared by the issue, transfer and purchase forms.
//!
//! A form always holds at least one row: adding appends a blank row at the
//! end, removing deletes by index and refuses to empty the list.

/// A draft row that knows when all of its fields are filled in.
pub trait RowDraft: Default {
    fn is_complete(&self) -> bool;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineRow {
    pub item: String,
    pub quantity: String,
}

impl RowDraft for LineRow {
    fn is_complete(&self) -> bool {
        !self.item.trim().is_empty() && !self.quantity.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PurchaseLineRow {
    pub item: String,
    pub quantity: String,
    pub amount: String,
}

impl RowDraft for PurchaseLineRow {
    fn is_complete(&self) -> bool {
        !self.item.trim().is_empty()
            && !self.quantity.trim().is_empty()
            && !self.amount.trim().is_empty()
    }
}

pub fn add_row<T: RowDraft>(rows: &mut Vec<T>) {
    rows.push(T::default());
}

/// Removes the row at `index`. A no-op when only one row remains or the
/// index is out of range.
pub fn remove_row<T: RowDraft>(rows: &mut Vec<T>, index: usize) {
    if rows.len() > 1 && index < rows.len() {
        rows.remove(index);
    }
}

pub fn all_complete<T: RowDraft>(rows: &[T]) -> bool {
    !rows.is_empty() && rows.iter().all(RowDraft::is_complete)
}

/// What a line-item form POST asks for: mutate the row list and re-render,
/// or submit the draft. Anything unrecognized is treated as a submit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowAction {
    Add,
    Remove(usize),
    Submit,
}

impl RowAction {
    pub fn parse(raw: &str) -> Self {
        if raw == "add" {
            return RowAction::Add;
        }
        if let Some(index) = raw.strip_prefix("remove:") {
            if let Ok(index) = index.parse() {
                return RowAction::Remove(index);
            }
        }
        RowAction::Submit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(item: &str, quantity: &str) -> LineRow {
        LineRow {
            item: item.to_string(),
            quantity: quantity.to_string(),
        }
    }

    #[test]
    fn add_appends_a_blank_row_at_the_end() {
        let mut rows = vec![row("Chair", "2")];
        add_row(&mut rows);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], LineRow::default());
    }

    #[test]
    fn remove_is_a_noop_on_the_last_remaining_row() {
        let mut rows = vec![row("Chair", "2")];
        remove_row(&mut rows, 0);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn remove_deletes_by_index() {
        let mut rows = vec![row("Chair", "2"), row("Desk", "1"), row("Lamp", "3")];
        remove_row(&mut rows, 1);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].item, "Chair");
        assert_eq!(rows[1].item, "Lamp");
    }

    #[test]
    fn remove_ignores_out_of_range_index() {
        let mut rows = vec![row("Chair", "2"), row("Desk", "1")];
        remove_row(&mut rows, 5);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn completeness_requires_every_field_of_every_row() {
        assert!(all_complete(&[row("Chair", "2")]));
        assert!(!all_complete(&[row("Chair", "2"), row("", "1")]));
        assert!(!all_complete(&[row("Chair", "")]));
        assert!(!all_complete::<LineRow>(&[]));
    }

    #[test]
    fn actions_parse_from_the_posted_value() {
        assert_eq!(RowAction::parse("add"), RowAction::Add);
        assert_eq!(RowAction::parse("remove:2"), RowAction::Remove(2));
        assert_eq!(RowAction::parse("submit"), RowAction::Submit);
        assert_eq!(RowAction::parse("remove:x"), RowAction::Submit);
        assert_eq!(RowAction::parse(""), RowAction::Submit);
    }

    #[test]
    fn purchase_rows_also_require_the_amount() {
        let mut r = PurchaseLineRow {
            item: "Chair".to_string(),
            quantity: "2".to_string(),
            amount: String::new(),
        };
        assert!(!r.is_complete());
        r.amount = "150".to_string();
        assert!(r.is_complete());
    }
}
