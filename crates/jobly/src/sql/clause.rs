use crate::value::SqlValue;

/// A SQL fragment with `$1..$N` placeholders and the values they bind, in order.
///
/// Placeholder `$N` always binds `values[N - 1]`; the text contains exactly
/// `values.len()` placeholders. An empty clause (no text, no values) means
/// "nothing to add", e.g. a filter with no criteria.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledClause {
    /// Clause text, e.g. `"first_name"=$1, "age"=$2` or `WHERE salary >= $1`.
    pub text: String,
    /// Bound values in placeholder order.
    pub values: Vec<SqlValue>,
}

impl CompiledClause {
    /// Whether the clause contributes nothing to a statement.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of placeholders (and values) in the clause.
    pub fn placeholder_count(&self) -> usize {
        self.values.len()
    }

    /// Index of the placeholder a caller should use for the next value appended
    /// after this clause.
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}
