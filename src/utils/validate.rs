/// Returns the name of the first empty field, walking the list in its fixed
/// order. `None` means every required field is filled.
pub fn first_missing<'a>(fields: &[(&'a str, &str)]) -> Option<&'a str> {
    fields
        .iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
}

pub fn missing_field_message(field: &str) -> String {
    format!("Please fill in the {}", field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_filled_passes() {
        assert_eq!(
            first_missing(&[("EmpId", "E-1"), ("Name", "Ravi")]),
            None
        );
    }

    #[test]
    fn reports_exactly_the_first_missing_field() {
        assert_eq!(
            first_missing(&[("EmpId", "E-1"), ("Name", ""), ("Mail", "")]),
            Some("Name")
        );
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        assert_eq!(first_missing(&[("Name", "   ")]), Some("Name"));
    }

    #[test]
    fn message_names_the_field() {
        assert_eq!(
            missing_field_message("OfficeCode"),
            "Please fill in the OfficeCode"
        );
    }
}
