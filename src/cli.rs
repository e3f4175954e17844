// CLI module - command-line argument parsing and handlers
//
// `boba` runs the demo; `boba --route ROUTE` starts it on another route.
// The config subcommand inspects configuration:
// - config --show: Display effective configuration
// - config --path: Show config file path

use boba::config::{Config, VERSION};
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

/// boba - composable terminal forms with stack-based routing
#[derive(Debug, Parser)]
#[command(name = "boba")]
#[command(version = VERSION)]
#[command(about = "Terminal forms and pages with stack-based routing", long_about = None)]
pub struct Cli {
    /// Route to start on (overrides BOBA_ROUTE and the config file)
    #[arg(long)]
    pub route: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Inspect configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// What main should do after argument handling
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Run the TUI, optionally on a route given on the command line
    Run { route: Option<String> },
    /// A subcommand already did its work
    Handled,
}

/// Parse arguments and run any subcommand
pub fn handle_cli() -> Result<Outcome> {
    dispatch(Cli::parse())
}

fn dispatch(cli: Cli) -> Result<Outcome> {
    match cli.command {
        Some(Commands::Config { show, path }) => {
            if path {
                handle_config_path()?;
            } else if show {
                handle_config_show()?;
            } else {
                println!("Usage: boba config [--show|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --path    Show config file path");
            }
            Ok(Outcome::Handled)
        }
        None => Ok(Outcome::Run { route: cli.route }),
    }
}

fn handle_config_path() -> Result<()> {
    match Config::config_path() {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => bail!("could not determine config path"),
    }
}

fn handle_config_show() -> Result<()> {
    let config = Config::from_env()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_flag() {
        let cli = Cli::try_parse_from(["boba", "--route", "tags?tag=rust"]).unwrap();
        assert_eq!(
            dispatch(cli).unwrap(),
            Outcome::Run {
                route: Some("tags?tag=rust".to_string())
            }
        );

        let cli = Cli::try_parse_from(["boba"]).unwrap();
        assert_eq!(dispatch(cli).unwrap(), Outcome::Run { route: None });
    }

    #[test]
    fn test_config_subcommand_parses() {
        let cli = Cli::try_parse_from(["boba", "config", "--path"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                path: true,
                show: false
            })
        ));
        assert!(Cli::try_parse_from(["boba", "config", "--reset"]).is_err());
    }
}
