//! In-process table filtering. The loaded list is filtered here, never on the
//! remote service.

/// Case-insensitive substring match of `term` against the row's designated
/// fields. An empty term matches everything; an absent field never matches.
pub fn matches_term(term: &str, fields: &[Option<&str>]) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    fields
        .iter()
        .any(|field| field.map_or(false, |value| value.to_lowercase().contains(&needle)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_term_matches_every_row() {
        assert!(matches_term("", &[Some("anything")]));
        assert!(matches_term("", &[None]));
        assert!(matches_term("", &[]));
    }

    #[test]
    fn match_is_case_insensitive_substring() {
        assert!(matches_term("chai", &[Some("Office Chair")]));
        assert!(matches_term("CHAIR", &[Some("office chair")]));
        assert!(!matches_term("desk", &[Some("Office Chair")]));
    }

    #[test]
    fn any_designated_field_can_match() {
        assert!(matches_term("e-42", &[Some("Ravi"), Some("E-42")]));
        assert!(matches_term("ravi", &[Some("Ravi"), Some("E-42")]));
    }

    #[test]
    fn absent_fields_never_match_and_never_panic() {
        assert!(!matches_term("x", &[None]));
        assert!(!matches_term("x", &[None, None]));
        assert!(matches_term("x", &[None, Some("box")]));
    }
}
