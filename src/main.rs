//! propconf: inspect section/property configuration files.
//!
//! ```text
//! propconf sections app.conf
//! propconf props app.conf server
//! propconf get app.conf server:port --as int --default 8080
//! propconf dump app.conf --json
//! propconf check app.conf
//! propconf watch app.conf        # SIGHUP reloads, Ctrl+C exits
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use propconf::config::access::{parse_bool, parse_float, parse_int, parse_mode};
use propconf::lifecycle::signals::{run_reload_loop, spawn_interrupt_listener};
use propconf::lifecycle::ReloadControl;
use propconf::observability::logging::{init_logging, LogFormat};
use propconf::{Config, PropertySource};

#[derive(Parser)]
#[command(name = "propconf")]
#[command(version, about = "Inspect section/property configuration files", long_about = None)]
struct Cli {
    /// Emit logs as JSON.
    #[arg(long, global = true, env = "PROPCONF_JSON_LOGS")]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List sections in first-seen order
    Sections { file: PathBuf },
    /// List properties of a section
    Props { file: PathBuf, section: String },
    /// Read a single value
    Get {
        file: PathBuf,
        /// Composite key, e.g. `server:port`
        key: String,
        #[arg(long = "as", value_enum, default_value_t = ValueType::Str)]
        kind: ValueType,
        /// Value used when the key is absent or empty
        #[arg(long)]
        default: Option<String>,
    },
    /// Print every resolved key and value
    Dump {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Load the file and report any error
    Check { file: PathBuf },
    /// Reload on SIGHUP and report changed keys until Ctrl+C
    Watch { file: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ValueType {
    Str,
    Int,
    Float,
    Bool,
    Mode,
    Duration,
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_logging("propconf=info", format);

    if let Err(e) = run(cli.command).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> CliResult<()> {
    match command {
        Commands::Sections { file } => {
            let config = Config::load(&file)?;
            for section in config.sections() {
                println!("{}", section);
            }
        }
        Commands::Props { file, section } => {
            let config = Config::load(&file)?;
            for prop in config.props(&section) {
                println!("{}", prop);
            }
        }
        Commands::Get {
            file,
            key,
            kind,
            default,
        } => {
            let config = Config::load(&file)?;
            println!("{}", read_value(&config, &key, kind, default.as_deref())?);
        }
        Commands::Dump { file, json } => {
            let config = Config::load(&file)?;
            dump(&config, json)?;
        }
        Commands::Check { file } => {
            let config = Config::load(&file)?;
            let snapshot = config.snapshot();
            println!(
                "{}: OK ({} sections, {} properties)",
                file.display(),
                snapshot.sections().len(),
                snapshot.len()
            );
        }
        Commands::Watch { file } => watch(&file).await?,
    }

    Ok(())
}

fn read_value(config: &Config, key: &str, kind: ValueType, default: Option<&str>) -> CliResult<String> {
    let value = match (kind, default) {
        (ValueType::Str, d) => config.get_s_or(key, d.unwrap_or("")),
        (ValueType::Int, d) => {
            let d = d.map(|v| parse_int(v).ok_or("default is not an integer")).transpose()?;
            config.get_i_or(key, d.unwrap_or(0)).to_string()
        }
        (ValueType::Float, d) => {
            let d = d.map(|v| parse_float(v).ok_or("default is not a number")).transpose()?;
            config.get_f_or(key, d.unwrap_or(0.0)).to_string()
        }
        (ValueType::Bool, d) => config.get_b_or(key, d.map(parse_bool).unwrap_or(false)).to_string(),
        (ValueType::Mode, d) => {
            let d = d.map(|v| parse_mode(v).ok_or("default is not an octal mode")).transpose()?;
            config.get_m_or(key, d.unwrap_or_default()).to_string()
        }
        (ValueType::Duration, d) => {
            let d = d
                .map(|v| parse_int(v).and_then(|s| u64::try_from(s).ok()).ok_or("default is not a number of seconds"))
                .transpose()?;
            let secs = config.get_d_or(key, Duration::from_secs(d.unwrap_or(0))).as_secs();
            format!("{}s", secs)
        }
    };

    Ok(value)
}

fn dump(config: &Config, json: bool) -> CliResult<()> {
    let snapshot = config.snapshot();
    let entries: Vec<(String, String)> = snapshot
        .keys()
        .map(|key| {
            let value = snapshot.resolve(&key).unwrap_or_default();
            (key, value)
        })
        .collect();

    if json {
        let map: BTreeMap<_, _> = entries.into_iter().collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        for (key, value) in entries {
            println!("{} = {}", key, value);
        }
    }
    Ok(())
}

async fn watch(file: &Path) -> CliResult<()> {
    let config = Arc::new(Config::load(file)?);
    let (control, triggers) = ReloadControl::channel(1);

    #[cfg(unix)]
    propconf::lifecycle::signals::spawn_hangup_listener(control.clone())?;

    spawn_interrupt_listener(control);

    tracing::info!(path = %file.display(), "Watching config, send SIGHUP to reload");

    let reloads = run_reload_loop(config, triggers, |result| match result {
        Ok(diff) => {
            if diff.changed_count() == 0 {
                println!("no changes");
            }
            for key in diff.changed_keys() {
                println!("changed {}", key);
            }
        }
        Err(e) => tracing::error!(error = %e, "Reload failed, keeping current configuration"),
    })
    .await;

    tracing::info!(reloads, "Watch stopped");
    Ok(())
}
