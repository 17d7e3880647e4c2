use super::*;
use crate::value::SqlValue;

#[test]
fn builds_placeholders_in_order() {
    let mut q = sql("salary >= ");
    q.push_bind(100).push(" AND title ILIKE ").push_bind("%j%");

    assert_eq!(q.to_sql(), "salary >= $1 AND title ILIKE $2");
    assert_eq!(
        q.params(),
        &[SqlValue::Int(100), SqlValue::Text("%j%".into())]
    );
}

#[test]
fn can_compose_fragments() {
    let mut w = Sql::empty();
    w.push(" WHERE id = ").push_bind(42);

    let mut q = sql("SELECT * FROM jobs");
    q.push_sql(w);

    assert_eq!(q.to_sql(), "SELECT * FROM jobs WHERE id = $1");
    assert_eq!(q.placeholder_count(), 1);
}

#[test]
fn composed_fragments_are_renumbered() {
    let a = sql("a = ").bind(1);
    let b = sql("b = ").bind(2);

    let mut q = Sql::empty();
    q.push_joined([a, b], ", ");

    assert_eq!(q.to_sql(), "a = $1, b = $2");
}

#[test]
fn push_ident_quotes_and_escapes() {
    let mut q = Sql::empty();
    q.push_ident("first_name").push(", ").push_ident(r#"we"ird"#);
    assert_eq!(q.to_sql(), r#""first_name", "we""ird""#);
}

#[test]
fn where_and_is_noop_without_predicates() {
    let mut q = Sql::empty();
    q.push_where_and(Vec::new());
    assert!(q.is_empty());
    assert_eq!(q.into_clause(), CompiledClause::default());
}

#[test]
fn where_and_joins_predicates() {
    let mut q = Sql::empty();
    q.push_where_and(vec![sql("salary >= ").bind(5), sql("equity > 0")]);

    let clause = q.into_clause();
    assert_eq!(clause.text, "WHERE salary >= $1 AND equity > 0");
    assert_eq!(clause.values, vec![SqlValue::Int(5)]);
    assert_eq!(clause.next_placeholder(), 2);
}

#[test]
fn double_digit_placeholders() {
    let mut q = Sql::empty();
    for i in 0..12 {
        if i > 0 {
            q.push(", ");
        }
        q.push_bind(i);
    }
    assert!(q.to_sql().ends_with("$11, $12"));
}

#[test]
fn query_binds_clause_before_trailing_key() {
    let clause = sql("\"title\"=").bind("New").into_clause();
    let q = query(format!(
        "UPDATE jobs SET {} WHERE id = ${}",
        clause.text,
        clause.next_placeholder()
    ))
    .bind_clause(clause)
    .bind(7_i32);

    assert_eq!(q.sql(), "UPDATE jobs SET \"title\"=$1 WHERE id = $2");
    assert_eq!(q.param_count(), 2);
    assert_eq!(q.params_ref().len(), 2);
}

#[test]
fn query_debug_shows_statement_not_values() {
    let q = query("SELECT 1 WHERE $1").tag("jobs.get").bind("secret");
    let shown = format!("{q:?}");
    assert!(shown.contains("SELECT 1 WHERE $1"));
    assert!(shown.contains("param_count: 1"));
    assert!(!shown.contains("secret"));
}
