/// Case-insensitive "contains" behind the search boxes. A blank query
/// matches everything.
pub(crate) fn matches_search(query: Option<&str>, fields: &[&str]) -> bool {
    let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) else {
        return true;
    };
    let query = query.to_lowercase();
    fields.iter().any(|field| field.to_lowercase().contains(&query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_is_case_insensitive_and_optional() {
        assert!(matches_search(None, &["Asha"]));
        assert!(matches_search(Some("  "), &["Asha"]));
        assert!(matches_search(Some("ash"), &["Asha", "Family Room"]));
        assert!(matches_search(Some("FAMILY"), &["Asha", "Family Room"]));
        assert!(!matches_search(Some("suite"), &["Asha", "Family Room"]));
    }
}
