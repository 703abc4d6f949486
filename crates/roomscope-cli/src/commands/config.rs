//! Configuration file commands.

use clap::{Args, Subcommand};
use roomscope_config::{config_to_toml, default_config_path, init_config, load_or_default};
use std::path::PathBuf;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show {
        /// Configuration file to read instead of the default location
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write the default configuration to a file
    Init {
        /// Destination (defaults to the user config directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the default configuration file location
    Path,
}

/// Run the config command.
pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show { config } => {
            let (config, source) = load_or_default(config.as_deref())?;
            println!("# source: {source}");
            print!("{}", config_to_toml(&config)?);
        }
        ConfigCommand::Init { output, force } => {
            let path = output.unwrap_or_else(default_config_path);
            init_config(&path, force)?;
            println!("Wrote default configuration to {}", path.display());
        }
        ConfigCommand::Path => {
            println!("{}", default_config_path().display());
        }
    }
    Ok(())
}
