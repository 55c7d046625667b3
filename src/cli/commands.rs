//! CLI command definitions and handlers

use clap::Subcommand;

use crate::core::config::RelayConfig;

/// Commands for the Ibani translator relay
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Start HTTP API server
    Serve {
        /// Bind address (overrides HOST)
        #[arg(long)]
        host: Option<String>,

        /// Listen port (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the effective configuration with secrets masked
    Config,
}

/// Handle server command
pub async fn handle_server(
    mut config: RelayConfig,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    use crate::server::api::run_server;
    use tracing::info;

    if host.is_some() || port.is_some() {
        apply_overrides(&mut config, host, port);
        config.validate()?;
    }

    info!("=========================================");
    info!("Ibani Translator relay is running");
    info!("Port: {}", config.port);
    info!("Model: {}", config.model_id);
    info!("Backend: {}", config.backend);
    info!("Health Check: http://localhost:{}/health", config.port);
    info!("=========================================");

    run_server(config).await?;

    Ok(())
}

/// Handle config command
pub fn handle_config(config: &RelayConfig) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&config.redacted())?);
    Ok(())
}

/// Apply `--host` / `--port` on top of the loaded configuration
fn apply_overrides(config: &mut RelayConfig, host: Option<String>, port: Option<u16>) {
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
}
