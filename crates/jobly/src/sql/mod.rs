//! Parameterized SQL plumbing.
//!
//! Two shapes are used across the crate:
//! - [`Sql`] composes a fragment without tracking placeholder indices by hand and
//!   compiles to a [`CompiledClause`] (`$1, $2...` text plus ordered values).
//! - [`Query`] takes a statement whose placeholders are already numbered and binds
//!   values in order; the record access layer builds its final statements with it.
//!
//! # Example
//!
//! ```ignore
//! use jobly::sql;
//!
//! let mut w = sql("salary >= ");
//! w.push_bind(100).push(" AND title ILIKE ").push_bind("%eng%");
//! let clause = w.into_clause();
//! assert_eq!(clause.text, "salary >= $1 AND title ILIKE $2");
//! ```

mod builder;
mod clause;
mod log;
mod parts;
mod query;

#[cfg(test)]
mod tests;

pub use builder::Sql;
pub use clause::CompiledClause;
pub use query::Query;

/// Build a statement from a pre-numbered SQL string (`$1, $2, ...`).
pub fn query(initial_sql: impl Into<String>) -> Query {
    Query::new(initial_sql)
}

/// Start building a SQL fragment.
pub fn sql(initial_sql: impl Into<String>) -> Sql {
    Sql::new(initial_sql)
}
