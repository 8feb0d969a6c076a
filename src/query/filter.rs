//! Predicate filtering for selector evaluation
//!
//! Exact match only: no type coercion, no expressions.

use serde_json::Value;

use super::selector::Predicate;

/// Evaluates equality predicates against documents
pub struct PredicateFilter;

impl PredicateFilter {
    /// Checks if a document matches all predicates (AND semantics)
    pub fn matches(document: &Value, predicates: &[Predicate]) -> bool {
        predicates
            .iter()
            .all(|pred| Self::matches_predicate(document, pred))
    }

    fn matches_predicate(document: &Value, predicate: &Predicate) -> bool {
        let field_value = match document.get(&predicate.field) {
            Some(v) => v,
            None => return false, // Missing field = no match
        };

        // Null values never match
        if field_value.is_null() {
            return false;
        }

        field_value == &predicate.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_equality_match() {
        let doc = json!({"email": "ana@x.io", "recipients": 30});

        let pred = Predicate::eq("email", json!("ana@x.io"));
        assert!(PredicateFilter::matches(&doc, &[pred]));

        let pred = Predicate::eq("email", json!("bob@x.io"));
        assert!(!PredicateFilter::matches(&doc, &[pred]));
    }

    #[test]
    fn test_no_type_coercion() {
        let doc = json!({"recipients": 123});

        // String "123" should NOT match integer 123
        let pred = Predicate::eq("recipients", json!("123"));
        assert!(!PredicateFilter::matches(&doc, &[pred]));

        let pred = Predicate::eq("recipients", json!(123));
        assert!(PredicateFilter::matches(&doc, &[pred]));
    }

    #[test]
    fn test_case_sensitive() {
        let doc = json!({"email": "ana@x.io"});
        let pred = Predicate::eq("email", json!("ANA@x.io"));
        assert!(!PredicateFilter::matches(&doc, &[pred]));
    }

    #[test]
    fn test_missing_field_no_match() {
        let doc = json!({"name": "Ana"});

        let pred = Predicate::eq("email", json!("ana@x.io"));
        assert!(!PredicateFilter::matches(&doc, &[pred]));
    }

    #[test]
    fn test_null_value_no_match() {
        let doc = json!({"lastLogin": null});

        let pred = Predicate::eq("lastLogin", json!(null));
        assert!(!PredicateFilter::matches(&doc, &[pred]));
    }

    #[test]
    fn test_no_predicates_matches_everything() {
        assert!(PredicateFilter::matches(&json!({}), &[]));
    }
}
