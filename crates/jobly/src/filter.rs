//! Search criteria for listings and their compilation into `WHERE` clauses.
//!
//! The compilers only recognize the criteria their struct declares and never fail;
//! rejecting unknown keys or malformed values happens when the criteria are built
//! (serde with `deny_unknown_fields`, or [`JobFilter::from_query_pairs`]).

use crate::error::{JoblyError, JoblyResult};
use crate::sql::{CompiledClause, Sql, sql};
use serde::Deserialize;

/// Optional criteria for listing jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilter {
    /// Inclusive lower bound on salary.
    pub min_salary: Option<i64>,
    /// `true` restricts to jobs with equity > 0; `false` imposes nothing.
    pub has_equity: Option<bool>,
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
}

impl JobFilter {
    pub const KEYS: &'static [&'static str] = &["minSalary", "hasEquity", "title"];

    /// Build criteria from query-string pairs (`minSalary=100&hasEquity=true`).
    ///
    /// Unknown keys and unparsable values are a [`JoblyError::Validation`].
    pub fn from_query_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> JoblyResult<Self> {
        let mut filter = Self::default();
        for (key, value) in pairs {
            match key {
                "minSalary" => filter.min_salary = Some(parse_int(key, value)?),
                "hasEquity" => filter.has_equity = Some(parse_bool(key, value)?),
                "title" => filter.title = Some(value.to_string()),
                _ => return Err(unknown_key(key, Self::KEYS)),
            }
        }
        Ok(filter)
    }

    pub fn is_empty(&self) -> bool {
        self.min_salary.is_none() && self.has_equity != Some(true) && self.title.is_none()
    }
}

/// Optional criteria for listing companies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyFilter {
    /// Case-insensitive substring of the company name.
    pub name: Option<String>,
    /// Inclusive lower bound on headcount.
    pub min_employees: Option<i64>,
    /// Inclusive upper bound on headcount.
    pub max_employees: Option<i64>,
}

impl CompanyFilter {
    pub const KEYS: &'static [&'static str] = &["name", "minEmployees", "maxEmployees"];

    /// Build criteria from query-string pairs (`name=net&minEmployees=10`).
    ///
    /// Unknown keys and unparsable values are a [`JoblyError::Validation`].
    pub fn from_query_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> JoblyResult<Self> {
        let mut filter = Self::default();
        for (key, value) in pairs {
            match key {
                "name" => filter.name = Some(value.to_string()),
                "minEmployees" => filter.min_employees = Some(parse_int(key, value)?),
                "maxEmployees" => filter.max_employees = Some(parse_int(key, value)?),
                _ => return Err(unknown_key(key, Self::KEYS)),
            }
        }
        Ok(filter)
    }

    /// Reject a headcount range that can't match anything.
    pub fn validate(&self) -> JoblyResult<()> {
        match (self.min_employees, self.max_employees) {
            (Some(min), Some(max)) if min > max => Err(JoblyError::validation(
                "minEmployees cannot be greater than maxEmployees",
            )),
            _ => Ok(()),
        }
    }
}

fn parse_int(key: &str, value: &str) -> JoblyResult<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| JoblyError::validation(format!("{key} must be an integer, got {value:?}")))
}

fn parse_bool(key: &str, value: &str) -> JoblyResult<bool> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(JoblyError::validation(format!(
            "{key} must be true or false, got {value:?}"
        ))),
    }
}

fn unknown_key(key: &str, known: &[&str]) -> JoblyError {
    JoblyError::validation(format!(
        "unknown filter {key:?} (expected one of: {})",
        known.join(", ")
    ))
}

/// `%value%` for a substring `ILIKE`.
fn contains_pattern(value: &str) -> String {
    format!("%{value}%")
}

/// Compile job criteria into a `WHERE` clause.
///
/// Predicates are emitted in a fixed order: `salary >= $N`, `equity > 0` (no
/// value), `title ILIKE $N`, joined with `AND`. With no active criterion the
/// clause is empty.
pub fn compile_job_filters(criteria: &JobFilter) -> CompiledClause {
    let mut predicates = Vec::new();

    if let Some(min_salary) = criteria.min_salary {
        predicates.push(sql("salary >= ").bind(min_salary));
    }
    if criteria.has_equity == Some(true) {
        predicates.push(sql("equity > 0"));
    }
    if let Some(title) = &criteria.title {
        predicates.push(sql("title ILIKE ").bind(contains_pattern(title)));
    }

    let mut clause = Sql::empty();
    clause.push_where_and(predicates);
    clause.into_clause()
}

/// Compile company criteria into a `WHERE` clause.
///
/// Order: `name ILIKE $N`, `num_employees >= $N`, `num_employees <= $N`.
/// Call [`CompanyFilter::validate`] first; this function accepts any range.
pub fn compile_company_filters(criteria: &CompanyFilter) -> CompiledClause {
    let mut predicates = Vec::new();

    if let Some(name) = &criteria.name {
        predicates.push(sql("name ILIKE ").bind(contains_pattern(name)));
    }
    if let Some(min) = criteria.min_employees {
        predicates.push(sql("num_employees >= ").bind(min));
    }
    if let Some(max) = criteria.max_employees {
        predicates.push(sql("num_employees <= ").bind(max));
    }

    let mut clause = Sql::empty();
    clause.push_where_and(predicates);
    clause.into_clause()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SqlValue;

    #[test]
    fn no_criteria_means_no_where() {
        let clause = compile_job_filters(&JobFilter::default());
        assert!(clause.is_empty());
        assert!(clause.values.is_empty());
    }

    #[test]
    fn has_equity_true_adds_a_valueless_predicate() {
        let clause = compile_job_filters(&JobFilter {
            has_equity: Some(true),
            ..Default::default()
        });
        assert_eq!(clause.text, "WHERE equity > 0");
        assert!(clause.values.is_empty());
    }

    #[test]
    fn has_equity_false_imposes_nothing() {
        let clause = compile_job_filters(&JobFilter {
            has_equity: Some(false),
            ..Default::default()
        });
        assert!(clause.is_empty());
    }

    #[test]
    fn min_salary_and_title_are_and_ed() {
        let clause = compile_job_filters(&JobFilter {
            min_salary: Some(100),
            title: Some("j".into()),
            ..Default::default()
        });
        assert_eq!(clause.text, "WHERE salary >= $1 AND title ILIKE $2");
        assert_eq!(
            clause.values,
            vec![SqlValue::Int(100), SqlValue::from("%j%")]
        );
    }

    #[test]
    fn all_job_criteria_keep_placeholders_contiguous() {
        let clause = compile_job_filters(&JobFilter {
            min_salary: Some(100),
            has_equity: Some(true),
            title: Some("j".into()),
        });
        assert_eq!(
            clause.text,
            "WHERE salary >= $1 AND equity > 0 AND title ILIKE $2"
        );
        assert_eq!(clause.placeholder_count(), 2);
    }

    #[test]
    fn title_only_takes_the_first_placeholder() {
        let clause = compile_job_filters(&JobFilter {
            title: Some("eng".into()),
            has_equity: Some(false),
            ..Default::default()
        });
        assert_eq!(clause.text, "WHERE title ILIKE $1");
        assert_eq!(clause.values, vec![SqlValue::from("%eng%")]);
    }

    #[test]
    fn company_criteria_in_fixed_order() {
        let clause = compile_company_filters(&CompanyFilter {
            name: Some("net".into()),
            min_employees: Some(10),
            max_employees: Some(500),
        });
        assert_eq!(
            clause.text,
            "WHERE name ILIKE $1 AND num_employees >= $2 AND num_employees <= $3"
        );
        assert_eq!(
            clause.values,
            vec![SqlValue::from("%net%"), SqlValue::Int(10), SqlValue::Int(500)]
        );
    }

    #[test]
    fn inverted_headcount_range_is_rejected() {
        let filter = CompanyFilter {
            min_employees: Some(10),
            max_employees: Some(5),
            ..Default::default()
        };
        assert!(filter.validate().unwrap_err().is_validation());
        assert!(CompanyFilter::default().validate().is_ok());
    }

    #[test]
    fn query_pairs_are_parsed() {
        let filter =
            JobFilter::from_query_pairs([("minSalary", "100"), ("hasEquity", "true"), ("title", "j")])
                .unwrap();
        assert_eq!(
            filter,
            JobFilter {
                min_salary: Some(100),
                has_equity: Some(true),
                title: Some("j".into()),
            }
        );
    }

    #[test]
    fn unknown_query_key_is_rejected() {
        let err = JobFilter::from_query_pairs([("minSalary", "100"), ("not_title", "j")])
            .unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("not_title"));
    }

    #[test]
    fn malformed_query_values_are_rejected() {
        assert!(JobFilter::from_query_pairs([("minSalary", "lots")]).is_err());
        assert!(JobFilter::from_query_pairs([("hasEquity", "yes")]).is_err());
        assert!(CompanyFilter::from_query_pairs([("maxEmployees", "1.5")]).is_err());
    }

    #[test]
    fn serde_rejects_unknown_keys() {
        let ok: JobFilter = serde_json::from_str(r#"{"minSalary": 5, "hasEquity": true}"#).unwrap();
        assert_eq!(ok.min_salary, Some(5));
        assert!(serde_json::from_str::<JobFilter>(r#"{"not_title": "j"}"#).is_err());
        assert!(serde_json::from_str::<CompanyFilter>(r#"{"handle": "c1"}"#).is_err());
    }

    #[test]
    fn is_empty_ignores_has_equity_false() {
        assert!(JobFilter::default().is_empty());
        assert!(
            JobFilter {
                has_equity: Some(false),
                ..Default::default()
            }
            .is_empty()
        );
    }
}
