use tracing::Level;

/// Truncate long SQL strings (in bytes) in debug events.
const MAX_SQL_LENGTH: usize = 200;

fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// Emit the statement that is about to run on the `jobly.sql` target.
///
/// Only the placeholder count is logged, never the bound values.
pub(super) fn statement(tag: Option<&str>, sql: &str, param_count: usize) {
    if !tracing::enabled!(target: "jobly.sql", Level::DEBUG) {
        return;
    }
    let tag = tag.unwrap_or("-");
    if sql.len() > MAX_SQL_LENGTH {
        let sql = format!("{}...", truncate_sql_bytes(sql, MAX_SQL_LENGTH));
        tracing::debug!(target: "jobly.sql", tag, param_count, sql = %sql);
    } else {
        tracing::debug!(target: "jobly.sql", tag, param_count, sql = %sql);
    }
}
