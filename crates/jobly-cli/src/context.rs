use crate::cli::GlobalArgs;
use crate::config::ProjectConfig;
use anyhow::Context as _;
use jobly::deadpool_postgres::{Client, Pool};

/// Connection state shared by a single CLI invocation.
pub struct Context {
    pool: Pool,
}

impl Context {
    pub fn open(global: &GlobalArgs, config: Option<&ProjectConfig>) -> anyhow::Result<Self> {
        let database_url = resolve_database(global, config)?;
        let max_size = config
            .map(|c| c.file.database.max_connections)
            .unwrap_or(jobly::pool::DEFAULT_MAX_SIZE);
        let pool = jobly::create_pool_with_config(&database_url, max_size)
            .context("failed to create connection pool")?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub async fn client(&self) -> anyhow::Result<Client> {
        self.pool
            .get()
            .await
            .context("failed to connect to database")
    }
}

/// `--database`, then `database.url` from the config file, then `DATABASE_URL`.
fn resolve_database(global: &GlobalArgs, config: Option<&ProjectConfig>) -> anyhow::Result<String> {
    if let Some(v) = &global.database {
        return Ok(v.clone());
    }
    if let Some(cfg) = config {
        return cfg.file.database.url();
    }
    if let Ok(v) = std::env::var("DATABASE_URL") {
        return Ok(v);
    }
    anyhow::bail!(
        "database URL is required: pass --database, provide {} or set DATABASE_URL",
        global.config.display()
    )
}
