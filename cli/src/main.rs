//! chainvote: command-line dashboard for the voter, candidate and election contracts.

mod commands;
mod config;

use chainvote_contracts::{ChainvoteClient, ClientOptions, HttpTransport};
use chainvote_types::{Address, Chain, ElectionId};
use chainvote_utils::LogFormat;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use commands::admin::AdminCommand;
use commands::candidate::CandidateCommand;
use commands::election::ElectionCommand;
use commands::voter::VoterCommand;
use commands::Context;
use config::CliConfig;

#[derive(Parser)]
#[command(name = "chainvote", about = "Blockchain election dashboard", version)]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// flags and env vars override them.
    #[arg(long, env = "CHAINVOTE_CONFIG")]
    config: Option<PathBuf>,

    /// Contract gateway URL.
    #[arg(long, env = "CHAINVOTE_GATEWAY_URL")]
    gateway: Option<String>,

    /// Connected wallet address.
    #[arg(long, env = "CHAINVOTE_CALLER")]
    caller: Option<Address>,

    /// Chain the contracts are deployed on: "mainnet", "sepolia" or "localhost".
    #[arg(long, env = "CHAINVOTE_CHAIN")]
    chain: Option<Chain>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "CHAINVOTE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "CHAINVOTE_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Voter registration.
    Voter {
        #[command(subcommand)]
        action: VoterCommand,
    },
    /// Candidate registration.
    Candidate {
        #[command(subcommand)]
        action: CandidateCommand,
    },
    /// Election lifecycle, enrollment and results.
    Election {
        #[command(subcommand)]
        action: ElectionCommand,
    },
    /// Cast a vote; without `--candidate` prints the ballot.
    Vote {
        election_id: ElectionId,
        #[arg(long)]
        candidate: Option<Address>,
    },
    /// Admin roles and dashboard counts.
    Admin {
        #[command(subcommand)]
        action: AdminCommand,
    },
}

impl Cli {
    /// File config (or defaults) with flags and env vars applied on top.
    fn resolve_config(&self) -> anyhow::Result<CliConfig> {
        let mut config = match &self.config {
            Some(path) => CliConfig::from_toml_file(path)?,
            None => CliConfig::default(),
        };
        if let Some(gateway) = &self.gateway {
            config.gateway_url = gateway.clone();
        }
        if let Some(caller) = self.caller {
            config.caller = Some(caller);
        }
        if let Some(chain) = self.chain {
            config.chain = chain;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    chainvote_utils::init_logging(config.log_format, &config.log_level);

    if let Some(path) = &cli.config {
        tracing::debug!("loaded config from {}", path.display());
    }
    tracing::debug!(
        chain = config.chain.as_str(),
        chain_id = config.chain.chain_id(),
        gateway = %config.gateway_url,
        "starting chainvote"
    );

    let transport = HttpTransport::new(&config.gateway_url)?;
    let client = ChainvoteClient::with_options(
        Arc::new(transport),
        &config.addresses()?,
        ClientOptions {
            confirmation_poll: config.confirmation_poll(),
            ..ClientOptions::default()
        },
    );
    let ctx = Context::new(client, &config);

    match cli.command {
        Command::Voter { action } => commands::voter::run(&ctx, action).await?,
        Command::Candidate { action } => commands::candidate::run(&ctx, action).await?,
        Command::Election { action } => commands::election::run(&ctx, action).await?,
        Command::Vote {
            election_id,
            candidate,
        } => commands::vote::run(&ctx, election_id, candidate).await?,
        Command::Admin { action } => commands::admin::run(&ctx, action).await?,
    }

    tracing::debug!(stats = ?ctx.client.stats().snapshot(), "contract calls");
    Ok(())
}
