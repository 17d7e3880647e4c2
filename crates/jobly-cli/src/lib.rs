mod cli;
mod companies_cmd;
mod config;
mod context;
mod jobs_cmd;
mod migrate_cmd;

use config::ProjectConfig;
use tracing_subscriber::EnvFilter;

pub async fn run(args: Vec<String>) -> anyhow::Result<()> {
    let cmd = cli::parse_args(&args)?;
    let global = match &cmd {
        cli::Command::Help(topic) => {
            cli::print_help(*topic);
            return Ok(());
        }
        cli::Command::Migrate(global)
        | cli::Command::Jobs(global, _)
        | cli::Command::Companies(global, _) => global.clone(),
    };

    let _ = dotenvy::dotenv();
    let config = ProjectConfig::load_optional(&global.config)?;
    init_tracing(config.as_ref());
    if let Some(cfg) = &config {
        tracing::debug!(path = %cfg.config_path.display(), "loaded config");
    }

    let ctx = context::Context::open(&global, config.as_ref())?;
    match cmd {
        cli::Command::Help(_) => Ok(()),
        cli::Command::Migrate(_) => migrate_cmd::run(&ctx).await,
        cli::Command::Jobs(_, cmd) => jobs_cmd::run(&ctx, cmd).await,
        cli::Command::Companies(_, cmd) => companies_cmd::run(&ctx, cmd).await,
    }
}

/// Log to stderr; `RUST_LOG` wins over `log.level` from the config file.
fn init_tracing(config: Option<&ProjectConfig>) {
    let level = config
        .map(|c| c.file.log.level.clone())
        .unwrap_or_else(|| "warn".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
