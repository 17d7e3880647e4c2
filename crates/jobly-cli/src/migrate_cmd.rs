use crate::context::Context;
use anyhow::Context as _;

pub async fn run(ctx: &Context) -> anyhow::Result<()> {
    let report = jobly::migrate::run_pool(ctx.pool())
        .await
        .context("failed to apply migrations")?;

    let applied = report.applied_migrations();
    if applied.is_empty() {
        println!("schema is up to date");
    }
    for m in applied {
        println!("applied V{}__{}", m.version(), m.name());
    }
    Ok(())
}
