use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use huddle_server::{ServerConfig, tls_paths};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "huddle")]
#[command(about = "Signaling relay for browser group video calls")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    overrides: Overrides,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the signaling server (default).
    Serve,
    /// Print the effective configuration and exit.
    Config,
}

#[derive(clap::Args)]
struct Overrides {
    /// Address to listen on (overrides HUDDLE_BIND).
    #[arg(long, global = true)]
    bind: Option<SocketAddr>,

    /// Admin dashboard username (overrides HUDDLE_ADMIN_USERNAME).
    #[arg(long, global = true)]
    admin_username: Option<String>,

    /// Admin dashboard password (overrides HUDDLE_ADMIN_PASSWORD).
    #[arg(long, global = true)]
    admin_password: Option<String>,

    /// PEM certificate chain for HTTPS (overrides HUDDLE_TLS_CERT).
    #[arg(long, global = true, requires = "tls_key")]
    tls_cert: Option<String>,

    /// PEM private key for HTTPS (overrides HUDDLE_TLS_KEY).
    #[arg(long, global = true, requires = "tls_cert")]
    tls_key: Option<String>,
}

impl Overrides {
    fn apply(self, config: &mut ServerConfig) -> Result<()> {
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(username) = self.admin_username {
            config.admin.username = username;
        }
        if let Some(password) = self.admin_password {
            config.admin.password = password;
        }
        if self.tls_cert.is_some() || self.tls_key.is_some() {
            config.tls = tls_paths(self.tls_cert, self.tls_key).context("Invalid TLS options")?;
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ServerConfig::from_env().context("Invalid configuration")?;
    cli.overrides.apply(&mut config)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config),
        Commands::Config => {
            print_config(&config);
            Ok(())
        }
    }
}

fn serve(config: ServerConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let scheme = if config.is_tls() { "s" } else { "" };
    println!("{}", "📡 Starting huddle signaling server...".green().bold());
    println!("   🔌 WebSocket: ws{}://{}/ws", scheme, config.bind);
    println!("   📊 Analytics: http{}://{}/api/admin/analytics", scheme, config.bind);

    info!(
        "{} ICE server(s) configured, admin user {:?}",
        config.ice_servers.len(),
        config.admin.username
    );
    if let Some(tls) = &config.tls {
        info!("HTTPS enabled with certificate {}", tls.cert.display());
    }

    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    runtime.block_on(huddle_server::serve(config))
}

fn print_config(config: &ServerConfig) {
    println!("{}", "huddle configuration".cyan().bold());
    println!("   bind:              {}", config.bind);
    println!("   admin user:        {}", config.admin.username);
    println!("   recorder queue:    {}", config.recorder_capacity);
    println!("   recent sessions:   {}", config.recent_sessions);
    match &config.tls {
        Some(tls) => println!(
            "   tls:               {} / {}",
            tls.cert.display(),
            tls.key.display()
        ),
        None => println!("   tls:               {}", "off (plain HTTP)".yellow()),
    }
    println!("   ice servers:");
    for server in &config.ice_servers {
        let auth = if server.username.is_some() {
            " (with credentials)".yellow().to_string()
        } else {
            String::new()
        };
        println!("     - {}{}", server.urls.join(", "), auth);
    }
}
