use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Migrate,
    Jobs,
    Companies,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    Migrate(GlobalArgs),
    Jobs(GlobalArgs, RecordCommand<i32>),
    Companies(GlobalArgs, RecordCommand<String>),
}

/// Options accepted by every command that touches the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalArgs {
    pub config: PathBuf,
    pub database: Option<String>,
}

impl Default for GlobalArgs {
    fn default() -> Self {
        Self {
            config: PathBuf::from("jobly.toml"),
            database: None,
        }
    }
}

/// A record operation keyed by `K` (job id or company handle).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordCommand<K> {
    List { filters: Vec<(String, String)> },
    Get(K),
    Create { json: String },
    Update { key: K, json: String },
    Delete(K),
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1);
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    match first.as_str() {
        "-h" | "--help" => Ok(Command::Help(HelpTopic::Root)),
        "migrate" => parse_migrate(it.map(|s| s.as_str())),
        "jobs" => {
            match parse_record(it.map(|s| s.as_str()), HelpTopic::Jobs, parse_job_id)? {
                Parsed::Help(topic) => Ok(Command::Help(topic)),
                Parsed::Run(global, cmd) => Ok(Command::Jobs(global, cmd)),
            }
        }
        "companies" => {
            match parse_record(it.map(|s| s.as_str()), HelpTopic::Companies, parse_handle)? {
                Parsed::Help(topic) => Ok(Command::Help(topic)),
                Parsed::Run(global, cmd) => Ok(Command::Companies(global, cmd)),
            }
        }
        _ => anyhow::bail!("unknown command: {first}"),
    }
}

enum Parsed<K> {
    Help(HelpTopic),
    Run(GlobalArgs, RecordCommand<K>),
}

fn parse_job_id(v: &str) -> anyhow::Result<i32> {
    v.parse()
        .map_err(|_| anyhow::anyhow!("job id must be an integer, got {v:?}"))
}

fn parse_handle(v: &str) -> anyhow::Result<String> {
    Ok(v.to_string())
}

/// Consume a global option, returning `Ok(false)` when `token` isn't one.
fn parse_global<'a>(
    token: &'a str,
    it: &mut impl Iterator<Item = &'a str>,
    global: &mut GlobalArgs,
) -> anyhow::Result<bool> {
    match token {
        "--config" => {
            let Some(v) = it.next() else {
                anyhow::bail!("--config requires a value");
            };
            global.config = PathBuf::from(v);
        }
        _ if token.starts_with("--config=") => {
            global.config = PathBuf::from(token.trim_start_matches("--config="));
        }
        "--database" => {
            let Some(v) = it.next() else {
                anyhow::bail!("--database requires a value");
            };
            global.database = Some(v.to_string());
        }
        _ if token.starts_with("--database=") => {
            global.database = Some(token.trim_start_matches("--database=").to_string());
        }
        _ => return Ok(false),
    }
    Ok(true)
}

fn parse_migrate<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut global = GlobalArgs::default();

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Migrate)),
            _ if parse_global(token, &mut it, &mut global)? => {}
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }

    Ok(Command::Migrate(global))
}

fn parse_record<'a, K>(
    mut it: impl Iterator<Item = &'a str>,
    topic: HelpTopic,
    parse_key: fn(&str) -> anyhow::Result<K>,
) -> anyhow::Result<Parsed<K>> {
    let mut global = GlobalArgs::default();
    let mut json: Option<String> = None;
    let mut positional: Vec<&str> = Vec::new();

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Parsed::Help(topic)),
            "--json" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--json requires a value");
                };
                json = Some(v.to_string());
            }
            _ if token.starts_with("--json=") => {
                json = Some(token.trim_start_matches("--json=").to_string());
            }
            _ if parse_global(token, &mut it, &mut global)? => {}
            other if other.starts_with("--") => anyhow::bail!("unknown argument: {other}"),
            other => positional.push(other),
        }
    }

    let Some((&subcmd, rest)) = positional.split_first() else {
        return Ok(Parsed::Help(topic));
    };

    let key = |rest: &[&str]| -> anyhow::Result<K> {
        match rest {
            [key] => parse_key(key),
            [] => anyhow::bail!("{subcmd} requires a key"),
            _ => anyhow::bail!("{subcmd} takes exactly one key"),
        }
    };
    let require_json = |json: Option<String>| -> anyhow::Result<String> {
        json.ok_or_else(|| anyhow::anyhow!("{subcmd} requires --json <OBJECT>"))
    };

    let cmd = match subcmd {
        "list" => {
            let mut filters = Vec::with_capacity(rest.len());
            for pair in rest {
                let Some((k, v)) = pair.split_once('=') else {
                    anyhow::bail!("filters must look like key=value, got {pair:?}");
                };
                filters.push((k.to_string(), v.to_string()));
            }
            RecordCommand::List { filters }
        }
        "get" => RecordCommand::Get(key(rest)?),
        "create" => {
            if !rest.is_empty() {
                anyhow::bail!("create takes no positional arguments");
            }
            RecordCommand::Create {
                json: require_json(json)?,
            }
        }
        "update" => RecordCommand::Update {
            key: key(rest)?,
            json: require_json(json)?,
        },
        "delete" => RecordCommand::Delete(key(rest)?),
        other => anyhow::bail!("unknown subcommand: {other}"),
    };

    Ok(Parsed::Run(global, cmd))
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
jobly - admin CLI for the Jobly companies and jobs database

USAGE:
  jobly <COMMAND> [OPTIONS]

COMMANDS:
  migrate       Apply the embedded schema migrations
  jobs          List, show, create, update or delete jobs
  companies     List, show, create, update or delete companies

Run `jobly <command> --help` for more."
            );
        }
        HelpTopic::Migrate => {
            println!(
                "\
USAGE:
  jobly migrate [OPTIONS]

OPTIONS:
  --config <FILE>       Config file path (default: jobly.toml)
  --database <URL>      Override database.url from config
  -h, --help            Print help"
            );
        }
        HelpTopic::Jobs => {
            println!(
                "\
USAGE:
  jobly jobs list [minSalary=<N>] [hasEquity=true|false] [title=<TEXT>]
  jobly jobs get <ID>
  jobly jobs create --json '{{\"title\": ..., \"companyHandle\": ...}}'
  jobly jobs update <ID> --json '{{\"salary\": ...}}'
  jobly jobs delete <ID>

OPTIONS:
  --config <FILE>       Config file path (default: jobly.toml)
  --database <URL>      Override database.url from config
  --json <OBJECT>       Record fields for create/update
  -h, --help            Print help"
            );
        }
        HelpTopic::Companies => {
            println!(
                "\
USAGE:
  jobly companies list [name=<TEXT>] [minEmployees=<N>] [maxEmployees=<N>]
  jobly companies get <HANDLE>
  jobly companies create --json '{{\"handle\": ..., \"name\": ..., \"description\": ...}}'
  jobly companies update <HANDLE> --json '{{\"numEmployees\": ...}}'
  jobly companies delete <HANDLE>

OPTIONS:
  --config <FILE>       Config file path (default: jobly.toml)
  --database <URL>      Override database.url from config
  --json <OBJECT>       Record fields for create/update
  -h, --help            Print help"
            );
        }
    }
}
