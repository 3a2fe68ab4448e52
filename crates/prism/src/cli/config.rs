//! The `prism config` command.
//!
//! Prism runs against three external locations named in the config file:
//! the corpus dataset directory, the embedding sidecar endpoint, and the
//! rating log. `show` prints the active TOML together with where those
//! locations actually resolve (after `~` expansion), so a misbehaving
//! setup can be diagnosed without reading the loader code.

use clap::{Args, Subcommand};
use prism_core::Config;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the active configuration and its resolved locations
    Show,

    /// Print the config file location
    Path,

    /// Write a default config file
    Init {
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
pub async fn execute(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = Config::load()?;
            print!("{}", config.to_toml()?);
            println!();
            println!("# Resolved locations:");
            println!("#   dataset dir  {}", config.dataset_dir().display());
            println!("#   rating log   {}", config.ratings_file().display());
            println!("#   embedder     {}", config.embedder.endpoint);
        }

        ConfigCommand::Path => {
            println!("{}", Config::default_path().display());
        }

        ConfigCommand::Init { force } => {
            let path = Config::default_path();
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at: {}\nUse --force to overwrite.",
                    path.display()
                );
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let config = Config::default();
            std::fs::write(&path, config.to_toml()?)?;

            println!("Configuration written to {}", path.display());
            println!();
            println!("Next steps:");
            println!(
                "  1. Place a tiny-imagenet corpus at {} (or point corpus.dataset_dir elsewhere)",
                config.dataset_dir().display()
            );
            println!(
                "  2. Start the sentence-embedding sidecar at {}",
                config.embedder.endpoint
            );
            println!("  3. Run `prism status` to verify both are reachable");
        }
    }

    Ok(())
}
