//! Partial-update compilation: `SET` clauses built from only the supplied fields.
//!
//! ```ignore
//! use jobly::{FieldMapping, UpdateRequest, compile_partial_update};
//!
//! let request = UpdateRequest::new().set("firstName", "Aliya").set("age", 32);
//! let mapping = FieldMapping::new().map("firstName", "first_name");
//!
//! let clause = compile_partial_update(&request, &mapping)?;
//! assert_eq!(clause.text, r#""first_name"=$1, "age"=$2"#);
//! ```

use crate::error::{JoblyError, JoblyResult};
use crate::sql::{CompiledClause, Sql};
use crate::value::SqlValue;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::collections::HashMap;
use std::fmt;

/// Maps API-facing field names to storage column names.
///
/// Fields without an entry (or mapped to an empty name) use the field name itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping {
    columns: HashMap<String, String>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `field -> column` entry.
    pub fn map(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.columns.insert(field.into(), column.into());
        self
    }

    /// Storage column for `field`.
    pub fn column_for<'a>(&'a self, field: &'a str) -> &'a str {
        match self.columns.get(field) {
            Some(column) if !column.is_empty() => column.as_str(),
            _ => field,
        }
    }
}

impl<F: Into<String>, C: Into<String>> FromIterator<(F, C)> for FieldMapping {
    fn from_iter<I: IntoIterator<Item = (F, C)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(f, c)| (f.into(), c.into()))
                .collect(),
        }
    }
}

/// Fields to change and their new values, in the order they were supplied.
///
/// Deserializing from a JSON object keeps the object's key order, which is the
/// order placeholders are numbered in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateRequest {
    fields: Vec<(String, SqlValue)>,
}

impl UpdateRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field (consuming).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Set a field. Setting a field twice keeps its original position.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<SqlValue>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(f, _)| *f == field) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((field, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&SqlValue> {
        self.fields
            .iter()
            .find_map(|(f, v)| (f == field).then_some(v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.fields.iter().map(|(f, v)| (f.as_str(), v))
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(f, _)| f.as_str())
    }

    /// Reject any field not listed in `allowed`.
    pub fn ensure_only(&self, allowed: &[&str]) -> JoblyResult<()> {
        let unknown: Vec<&str> = self
            .fields()
            .filter(|f| !allowed.contains(f))
            .collect();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(JoblyError::validation(format!(
                "fields not allowed in update: {}",
                unknown.join(", ")
            )))
        }
    }
}

impl<F: Into<String>, V: Into<SqlValue>> FromIterator<(F, V)> for UpdateRequest {
    fn from_iter<I: IntoIterator<Item = (F, V)>>(iter: I) -> Self {
        let mut request = Self::new();
        for (field, value) in iter {
            request.insert(field, value);
        }
        request
    }
}

impl<'de> Deserialize<'de> for UpdateRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RequestVisitor;

        impl<'de> Visitor<'de> for RequestVisitor {
            type Value = UpdateRequest;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of field names to primitive values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut request = UpdateRequest::new();
                while let Some((field, value)) = map.next_entry::<String, SqlValue>()? {
                    request.insert(field, value);
                }
                Ok(request)
            }
        }

        deserializer.deserialize_map(RequestVisitor)
    }
}

/// Compile `request` into a `SET` clause body.
///
/// Each field becomes `"column"=$N`, where the column comes from `mapping` and `N`
/// is the field's 1-based position in the request; fragments are joined with `, `.
/// Values are returned in the same order. Fails with
/// [`JoblyError::Validation`] when the request is empty.
pub fn compile_partial_update(
    request: &UpdateRequest,
    mapping: &FieldMapping,
) -> JoblyResult<CompiledClause> {
    if request.is_empty() {
        return Err(JoblyError::validation("No data supplied"));
    }

    let mut set = Sql::empty();
    for (i, (field, value)) in request.iter().enumerate() {
        if i > 0 {
            set.push(", ");
        }
        set.push_ident(mapping.column_for(field))
            .push("=")
            .push_bind(value.clone());
    }
    Ok(set.into_clause())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_a_single_field() {
        let request = UpdateRequest::new().set("firstName", "Aliya");
        let mapping = FieldMapping::new().map("firstName", "first_name");

        let clause = compile_partial_update(&request, &mapping).unwrap();
        assert_eq!(clause.text, r#""first_name"=$1"#);
        assert_eq!(clause.values, vec![SqlValue::from("Aliya")]);
    }

    #[test]
    fn unmapped_fields_fall_back_to_their_name() {
        let request = UpdateRequest::new().set("age", 32);

        let clause = compile_partial_update(&request, &FieldMapping::new()).unwrap();
        assert_eq!(clause.text, r#""age"=$1"#);
        assert_eq!(clause.values, vec![SqlValue::Int(32)]);
    }

    #[test]
    fn two_fields_keep_their_order() {
        let request = UpdateRequest::new().set("firstName", "Alice").set("age", 32);
        let mapping = FieldMapping::new().map("firstName", "first_name");

        let clause = compile_partial_update(&request, &mapping).unwrap();
        assert_eq!(clause.text, r#""first_name"=$1, "age"=$2"#);
        assert_eq!(
            clause.values,
            vec![SqlValue::from("Alice"), SqlValue::Int(32)]
        );
    }

    #[test]
    fn empty_request_is_a_validation_error() {
        let mapping = FieldMapping::new().map("firstName", "first_name");
        let err = compile_partial_update(&UpdateRequest::new(), &mapping).unwrap_err();
        assert!(err.is_validation());

        let err = compile_partial_update(&UpdateRequest::new(), &FieldMapping::new()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn one_placeholder_per_field() {
        let request: UpdateRequest = (0..15).map(|i| (format!("f{i}"), i)).collect();

        let clause = compile_partial_update(&request, &FieldMapping::new()).unwrap();
        assert_eq!(clause.placeholder_count(), 15);
        for (i, value) in clause.values.iter().enumerate() {
            assert!(clause.text.contains(&format!("\"f{i}\"=${}", i + 1)));
            assert_eq!(*value, SqlValue::Int(i as i64));
        }
    }

    #[test]
    fn empty_mapping_entry_falls_back() {
        let mapping = FieldMapping::new().map("title", "");
        assert_eq!(mapping.column_for("title"), "title");
    }

    #[test]
    fn null_values_are_bound_not_dropped() {
        let request = UpdateRequest::new().set("logoUrl", SqlValue::Null);
        let mapping: FieldMapping = [("logoUrl", "logo_url")].into_iter().collect();

        let clause = compile_partial_update(&request, &mapping).unwrap();
        assert_eq!(clause.text, r#""logo_url"=$1"#);
        assert_eq!(clause.values, vec![SqlValue::Null]);
    }

    #[test]
    fn deserializing_keeps_json_key_order() {
        let request: UpdateRequest =
            serde_json::from_str(r#"{"salary": 5, "title": "Dev", "equity": "0.1"}"#).unwrap();
        assert_eq!(
            request.fields().collect::<Vec<_>>(),
            vec!["salary", "title", "equity"]
        );

        let clause = compile_partial_update(&request, &FieldMapping::new()).unwrap();
        assert_eq!(clause.text, r#""salary"=$1, "title"=$2, "equity"=$3"#);
    }

    #[test]
    fn repeated_field_keeps_first_position() {
        let request = UpdateRequest::new()
            .set("a", 1)
            .set("b", 2)
            .set("a", 3);
        assert_eq!(request.fields().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(request.get("a"), Some(&SqlValue::Int(3)));
    }

    #[test]
    fn ensure_only_names_the_offending_fields() {
        let request = UpdateRequest::new().set("title", "x").set("handle", "c9");
        let err = request.ensure_only(&["title", "salary", "equity"]).unwrap_err();
        assert!(err.to_string().contains("handle"));
        assert!(UpdateRequest::new().set("title", "x").ensure_only(&["title"]).is_ok());
    }
}
