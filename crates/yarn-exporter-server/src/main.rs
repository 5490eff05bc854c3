use std::{sync::Arc, time::Duration};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use yarn_exporter_common::error::ExporterError;
use yarn_exporter_metrics::{ExporterConfig, ExporterState, build_registry, exporter_router};

#[derive(Parser)]
#[command(
    name = "yarn-exporter",
    version,
    about = "Prometheus exporter for the YARN resource manager REST API"
)]
struct Cli {
    /// Yarn rest api address, eg: http://127.0.0.1:8088
    yarn_url: String,

    /// Yarn cluster name
    #[arg(short = 'n', long, default_value = "cluster_0")]
    cluster_name: String,

    /// Exporter listen port
    #[arg(short, long, default_value_t = 9459)]
    port: u16,

    /// Exporter host address
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Name of applications need to collect running status
    #[arg(short = 'c', long, num_args = 0..)]
    collected_apps: Vec<String>,

    /// Timeout in seconds for each request to the resource manager
    #[arg(short, long, default_value_t = 10)]
    timeout_secs: u64,

    /// Log level for the exporter crates, combined with RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn exporter_config(&self) -> Result<ExporterConfig, ExporterError> {
        if self.timeout_secs == 0 {
            return Err(ExporterError::InvalidArgument(
                "--timeout-secs must be greater than zero".to_string(),
            ));
        }

        Ok(ExporterConfig {
            yarn_url: self.yarn_url.clone(),
            cluster_name: self.cluster_name.clone(),
            collected_apps: self.collected_apps.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Target prefix match, so this also covers the library crates.
    let env_filter = EnvFilter::from_default_env()
        .add_directive(format!("yarn_exporter={}", cli.log_level).parse()?);
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let registry = build_registry(&cli.exporter_config()?)?;
    let app = exporter_router(Arc::new(ExporterState::new(registry)));

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("yarn exporter listening on {addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("yarn exporter stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
