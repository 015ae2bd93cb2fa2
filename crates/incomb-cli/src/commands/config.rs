//! Config command - inspect and create the JSON configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use incomb_core::IncombConfig;

use super::ConfigSource;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration and where it came from
    Show,

    /// Write the default configuration to a file
    Init(InitArgs),

    /// Print one value by dotted key (e.g. "parsing.header_markers")
    Get { key: String },

    /// Print the configuration file in use
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Destination (default: the -c path, then the per-user location)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Replace an existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let source = ConfigSource::resolve(config_path);

    match args.command {
        ConfigCommand::Show => {
            let config = source.load()?;
            eprintln!("{} {}", style("ℹ").blue(), describe(&source));
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigCommand::Init(init) => {
            let target = init.output.unwrap_or(source.path);
            write_defaults(&target, init.force)
        }
        ConfigCommand::Get { key } => {
            let value = lookup(&source.load()?, &key)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        ConfigCommand::Path => {
            println!("{}", source.path.display());
            eprintln!("{} {}", style("ℹ").blue(), describe(&source));
            Ok(())
        }
    }
}

fn describe(source: &ConfigSource) -> String {
    let origin = if source.explicit { "given with -c" } else { "per-user default" };
    if source.exists() {
        format!("{} ({}, loaded)", source.path.display(), origin)
    } else if source.explicit {
        format!("{} ({}, missing)", source.path.display(), origin)
    } else {
        format!(
            "{} ({}, not created; built-in defaults apply, see 'incomb config init')",
            source.path.display(),
            origin
        )
    }
}

fn write_defaults(target: &Path, force: bool) -> anyhow::Result<()> {
    if target.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to replace it",
            target.display()
        );
    }

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    IncombConfig::default().save(target)?;

    println!("{} Wrote default configuration to {}", style("✓").green(), target.display());
    Ok(())
}

fn lookup(config: &IncombConfig, key: &str) -> anyhow::Result<serde_json::Value> {
    let json = serde_json::to_value(config)?;
    key.split('.')
        .try_fold(&json, |node, part| node.get(part))
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))
}
