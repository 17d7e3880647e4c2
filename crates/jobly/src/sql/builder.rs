use super::clause::CompiledClause;
use super::parts::SqlPart;
use crate::value::SqlValue;
use std::fmt::Write as _;

/// A parameter-safe SQL fragment builder.
///
/// `Sql` stores SQL pieces and values separately and generates `$1, $2, ...`
/// placeholders in the order values were bound, so fragments can be composed
/// without renumbering by hand.
#[must_use]
#[derive(Debug, Clone, Default)]
pub struct Sql {
    parts: Vec<SqlPart>,
    params: Vec<SqlValue>,
}

impl Sql {
    /// Create a new builder with an initial SQL fragment.
    pub fn new(initial_sql: impl Into<String>) -> Self {
        let initial_sql = initial_sql.into();
        let parts = if initial_sql.is_empty() {
            Vec::new()
        } else {
            vec![SqlPart::Raw(initial_sql)]
        };
        Self {
            parts,
            params: Vec::new(),
        }
    }

    /// Create an empty builder.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether nothing has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Append raw SQL (no parameters).
    pub fn push(&mut self, sql: &str) -> &mut Self {
        if sql.is_empty() {
            return self;
        }

        match self.parts.last_mut() {
            Some(SqlPart::Raw(last)) => last.push_str(sql),
            _ => self.parts.push(SqlPart::Raw(sql.to_string())),
        }
        self
    }

    /// Append a parameter placeholder and bind its value.
    pub fn push_bind(&mut self, value: impl Into<SqlValue>) -> &mut Self {
        self.parts.push(SqlPart::Param);
        self.params.push(value.into());
        self
    }

    /// Bind a parameter and return `self` (consuming version of [`Sql::push_bind`]).
    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.push_bind(value);
        self
    }

    /// Append a double-quoted identifier.
    ///
    /// Postgres can't parameterize identifiers, so the name is written inline
    /// with embedded `"` doubled; the result always parses as one identifier.
    pub fn push_ident(&mut self, name: &str) -> &mut Self {
        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push('"');
        for c in name.chars() {
            if c == '"' {
                quoted.push('"');
            }
            quoted.push(c);
        }
        quoted.push('"');
        self.push(&quoted)
    }

    /// Append another `Sql` fragment, consuming it.
    pub fn push_sql(&mut self, mut other: Sql) -> &mut Self {
        for part in other.parts.drain(..) {
            match part {
                SqlPart::Raw(s) => {
                    self.push(&s);
                }
                SqlPart::Param => self.parts.push(SqlPart::Param),
            }
        }
        self.params.append(&mut other.params);
        self
    }

    /// Append fragments separated by `separator`.
    ///
    /// If `fragments` is empty, this is a no-op.
    pub fn push_joined(
        &mut self,
        fragments: impl IntoIterator<Item = Sql>,
        separator: &str,
    ) -> &mut Self {
        for (i, fragment) in fragments.into_iter().enumerate() {
            if i > 0 {
                self.push(separator);
            }
            self.push_sql(fragment);
        }
        self
    }

    /// Append `WHERE` followed by `predicates` joined with `AND`.
    ///
    /// If `predicates` is empty, this is a no-op: no dangling `WHERE`.
    pub fn push_where_and(&mut self, predicates: Vec<Sql>) -> &mut Self {
        if predicates.is_empty() {
            return self;
        }
        self.push("WHERE ");
        self.push_joined(predicates, " AND ")
    }

    /// Render SQL with `$1, $2, ...` placeholders.
    pub fn to_sql(&self) -> String {
        let cap: usize = self
            .parts
            .iter()
            .map(|p| match p {
                SqlPart::Raw(s) => s.len(),
                SqlPart::Param => 3,
            })
            .sum();

        let mut out = String::with_capacity(cap);
        let mut idx: usize = 0;
        for part in &self.parts {
            match part {
                SqlPart::Raw(s) => out.push_str(s),
                SqlPart::Param => {
                    idx += 1;
                    // Writing into a String cannot fail.
                    let _ = write!(out, "${idx}");
                }
            }
        }
        out
    }

    /// Bound values in placeholder order.
    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    /// Number of placeholders in the rendered text.
    pub fn placeholder_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|p| matches!(p, SqlPart::Param))
            .count()
    }

    /// Render into a [`CompiledClause`].
    pub fn into_clause(self) -> CompiledClause {
        debug_assert_eq!(self.placeholder_count(), self.params.len());
        CompiledClause {
            text: self.to_sql(),
            values: self.params,
        }
    }
}
