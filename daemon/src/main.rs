//! vox daemon — entry point for running the voting service.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use vox_node::{Node, NodeConfig};
use vox_notifier::LogMailer;
use vox_rpc::RpcServer;

#[derive(Parser)]
#[command(name = "vox-daemon", about = "vox email-verified voting service")]
struct Cli {
    /// Port for the HTTP server.
    #[arg(long, env = "VOX_LISTEN_PORT")]
    port: Option<u16>,

    /// Verification code TTL in seconds.
    #[arg(long, env = "VOX_CODE_TTL_SECS")]
    code_ttl_secs: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "VOX_LOG_LEVEL")]
    log_level: String,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    vox_utils::init_tracing(&cli.log_level);

    let file_config: Option<NodeConfig> = if let Some(ref config_path) = cli.config {
        match NodeConfig::from_toml_file(&config_path.display().to_string()) {
            Ok(cfg) => {
                tracing::info!("Loaded config from {}", config_path.display());
                Some(cfg)
            }
            Err(e) => {
                tracing::warn!("Failed to load config file: {e}, using CLI defaults");
                None
            }
        }
    } else {
        None
    };

    let base = file_config.unwrap_or_default();
    let config = NodeConfig {
        listen_port: cli.port.unwrap_or(base.listen_port),
        code_ttl_secs: cli.code_ttl_secs.unwrap_or(base.code_ttl_secs),
        log_level: cli.log_level,
        ..base
    };

    tracing::info!(
        port = config.listen_port,
        code_ttl_secs = config.code_ttl_secs,
        polls = config.poll_seeds.len(),
        "starting vox node"
    );

    // No SMTP relay is wired up yet; the log transport prints the code,
    // which is what local and staging runs want anyway.
    let node = Arc::new(Node::new(&config, Arc::new(LogMailer))?);
    let server = RpcServer::new(config.listen_port, node);
    server.start().await?;

    tracing::info!("vox daemon exited cleanly");
    Ok(())
}
