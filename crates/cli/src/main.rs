use clap::{Parser, Subcommand};
use meshdns_application::ports::{Network, Service};
use meshdns_domain::{config::CliOverrides, Config};
use meshdns_infrastructure::dns::DnsService;
use meshdns_infrastructure::system::HostNetwork;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

mod bootstrap;
mod commands;
mod server;

#[derive(Parser)]
#[command(name = "meshdns")]
#[command(version)]
#[command(about = "meshdns - DNS for a private mesh network")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long, global = true)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long, global = true)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the DNS service (default)
    Serve,

    /// Manage public upstream servers
    Dns {
        #[command(subcommand)]
        command: DnsCommand,
    },

    /// Create or inspect the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum DnsCommand {
    /// Add a public upstream server (ip, ip:port, [v6]:port or host:port)
    AddServer { addr: String },

    /// Remove a public upstream server
    RemoveServer { addr: String },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            dns_port: self.dns_port,
            bind_address: self.bind.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        None | Some(Command::Serve) => {
            let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
            bootstrap::init_logging(&config.logging);
            serve(config).await
        }
        Some(Command::Dns { command }) => {
            let path = bootstrap::config_file_path(cli.config.as_deref());
            match command {
                DnsCommand::AddServer { addr } => commands::dns::add_server(&path, addr),
                DnsCommand::RemoveServer { addr } => commands::dns::remove_server(&path, addr),
            }
        }
        Some(Command::Config { command }) => match command {
            ConfigCommand::Init { force } => {
                let path = cli
                    .config
                    .clone()
                    .unwrap_or_else(|| meshdns_domain::config::DEFAULT_CONFIG_PATHS[0].to_string());
                commands::config::init(&path, *force)
            }
            ConfigCommand::Show => {
                let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
                commands::config::show(&config)
            }
        },
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Starting meshdns v{}", env!("CARGO_PKG_VERSION"));

    let network: Arc<dyn Network> = Arc::new(HostNetwork::from_config(&config)?);
    let dns: Arc<dyn Service> = Arc::new(DnsService::from_config(&config)?);

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        server::wait_for_signal().await;
        signal_token.cancel();
    });

    server::supervise(vec![dns], network, shutdown).await?;

    info!("meshdns shutdown complete");
    Ok(())
}
