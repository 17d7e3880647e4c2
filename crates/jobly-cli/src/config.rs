use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub config_path: PathBuf,
    pub file: ConfigFile,
}

impl ProjectConfig {
    pub fn load(config_path: PathBuf) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(&config_path).map_err(|e| {
            anyhow::anyhow!(
                "failed to read config file {}: {e}",
                config_path.display()
            )
        })?;

        let file = ConfigFile::parse(&raw).map_err(|e| {
            anyhow::anyhow!("invalid config file {}: {e:#}", config_path.display())
        })?;

        Ok(Self { config_path, file })
    }

    /// Load `path` if it exists.
    pub fn load_optional(path: &Path) -> anyhow::Result<Option<Self>> {
        if path.exists() {
            Ok(Some(Self::load(path.to_path_buf())?))
        } else {
            Ok(None)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub version: String,

    pub database: DatabaseConfig,

    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// As written in the file; `${VAR}` references are resolved by [`DatabaseConfig::url`].
    url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

impl DatabaseConfig {
    /// The connection URL with environment references resolved.
    ///
    /// Resolution happens on use, so a `--database` override never needs the
    /// variables the file refers to.
    pub fn url(&self) -> anyhow::Result<String> {
        expand_env_refs("database.url", &self.url, env_lookup)
    }
}

fn default_max_connections() -> usize {
    jobly::pool::DEFAULT_MAX_SIZE
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ConfigFile {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let mut file: ConfigFile = toml::from_str(raw)?;
        file.log.level = expand_env_refs("log.level", &file.log.level, env_lookup)?;
        file.validate()?;
        Ok(file)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.version.trim() != "1" {
            anyhow::bail!("unsupported config version: {}", self.version);
        }
        if self.database.url.trim().is_empty() {
            anyhow::bail!("database.url must not be empty");
        }
        if self.database.max_connections == 0 {
            anyhow::bail!("database.max_connections must be at least 1");
        }
        Ok(())
    }
}

/// Process environment, including anything loaded from `.env`.
fn env_lookup(name: &str) -> Option<String> {
    dotenvy::var(name).ok()
}

/// Replace each `${NAME}` in `value` with `lookup(NAME)`.
///
/// `field` names the config key in error messages.
fn expand_env_refs(
    field: &str,
    value: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<String> {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            anyhow::bail!("{field}: unterminated reference `${{{after}`");
        };
        let name = &after[..end];
        if name.is_empty() {
            anyhow::bail!("{field}: empty reference `${{}}`");
        }
        let Some(v) = lookup(name) else {
            anyhow::bail!("{field} refers to ${{{name}}}, which is not set");
        };
        out.push_str(&v);
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}
