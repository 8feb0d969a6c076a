//! Declarative equality selectors
//!
//! Wire form: `{"selector":{"docType":"<kind>","<field>":<value>,...}}`.
//! Only exact equality on scalar values is expressible.

use serde_json::{Map, Value};

use crate::document::DocType;

use super::errors::{QueryError, QueryResult};
use super::filter::PredicateFilter;

/// Field holding the document kind
pub const DOC_TYPE_FIELD: &str = "docType";

/// A single equality predicate (field = value)
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Field name
    pub field: String,
    /// Expected value, compared without coercion
    pub value: Value,
}

impl Predicate {
    /// Create an equality predicate
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// A kind-scoped conjunction of equality predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    doc_type: DocType,
    predicates: Vec<Predicate>,
}

impl Selector {
    /// Selects every document of `doc_type`
    pub fn for_type(doc_type: DocType) -> Self {
        Self {
            doc_type,
            predicates: Vec::new(),
        }
    }

    /// Adds an equality filter
    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.predicates.push(Predicate::eq(field, value));
        self
    }

    /// Returns the kind this selector is scoped to
    pub fn doc_type(&self) -> DocType {
        self.doc_type
    }

    /// Returns the additional predicates, in insertion order
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Returns true if `document` satisfies the kind and every predicate
    pub fn matches(&self, document: &Value) -> bool {
        let kind_matches = document
            .get(DOC_TYPE_FIELD)
            .and_then(Value::as_str)
            .is_some_and(|tag| tag == self.doc_type.as_str());

        kind_matches && PredicateFilter::matches(document, &self.predicates)
    }

    /// Renders the selector in its wire form.
    ///
    /// `docType` comes first, then predicates in insertion order. Values are
    /// JSON-escaped, so caller input cannot alter the selector structure.
    pub fn to_query_string(&self) -> String {
        let mut out = String::with_capacity(64);
        out.push_str("{\"selector\":{\"");
        out.push_str(DOC_TYPE_FIELD);
        out.push_str("\":\"");
        out.push_str(self.doc_type.as_str());
        out.push('"');

        for pred in &self.predicates {
            out.push(',');
            out.push_str(&Value::String(pred.field.clone()).to_string());
            out.push(':');
            out.push_str(&pred.value.to_string());
        }

        out.push_str("}}");
        out
    }

    /// Parses the wire form.
    ///
    /// Rejects: a missing or non-object `selector`, other top-level keys, a
    /// missing or unknown `docType`, and any non-scalar predicate value
    /// (operator objects such as `{"$gt": 1}`, arrays, null).
    pub fn parse(query: &str) -> QueryResult<Self> {
        let root: Value = serde_json::from_str(query)
            .map_err(|e| QueryError::invalid_selector(format!("invalid JSON: {}", e)))?;

        let root = root
            .as_object()
            .ok_or_else(|| QueryError::invalid_selector("query must be a JSON object"))?;

        if let Some(extra) = root.keys().find(|k| k.as_str() != "selector") {
            return Err(QueryError::Unsupported {
                feature: format!("top-level key {}", extra),
            });
        }

        let body = root
            .get("selector")
            .and_then(Value::as_object)
            .ok_or_else(|| QueryError::invalid_selector("missing selector object"))?;

        let doc_type = Self::parse_doc_type(body)?;
        let mut selector = Self::for_type(doc_type);

        for (field, value) in body {
            if field == DOC_TYPE_FIELD {
                continue;
            }
            Self::check_scalar(field, value)?;
            selector.predicates.push(Predicate::eq(field.clone(), value.clone()));
        }

        Ok(selector)
    }

    fn parse_doc_type(body: &Map<String, Value>) -> QueryResult<DocType> {
        let tag = body
            .get(DOC_TYPE_FIELD)
            .ok_or_else(|| QueryError::invalid_selector("selector must constrain docType"))?;

        serde_json::from_value(tag.clone())
            .map_err(|_| QueryError::invalid_selector(format!("unknown docType {}", tag)))
    }

    fn check_scalar(field: &str, value: &Value) -> QueryResult<()> {
        match value {
            Value::String(_) | Value::Number(_) | Value::Bool(_) => Ok(()),
            Value::Object(_) => Err(QueryError::Unsupported {
                feature: format!("operator expression on field {}", field),
            }),
            Value::Array(_) | Value::Null => Err(QueryError::invalid_selector(format!(
                "field {} must compare against a scalar",
                field
            ))),
        }
    }
}
