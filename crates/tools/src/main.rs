use anyhow::Result;
use clap::{Parser, Subcommand};
use evmsync_tools::Config;

#[derive(Parser)]
#[command(name = "evmsync")]
#[command(about = "EvmSync CLI tools for toolchain configuration inspection")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved toolchain configuration
    Config {
        /// Validate configuration files
        #[arg(short, long)]
        validate: bool,
        /// Emit the configuration as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// List configured networks
    Networks,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config { validate, json } => {
            let config = Config::load()?;
            if json {
                println!("{}", config.to_json()?);
            } else {
                config.print_summary();
            }
            if validate {
                println!("Configuration OK");
            }
            Ok(())
        }
        Commands::Networks => {
            let config = Config::load()?;
            if config.networks.is_empty() {
                println!("No networks configured");
            } else {
                for (name, network) in &config.networks {
                    match network.chain_id {
                        Some(id) => println!("{}: {} (chain id {})", name, network.url, id),
                        None => println!("{}: {}", name, network.url),
                    }
                }
            }
            Ok(())
        }
    }
}
