/// CLI Interface Module
///
/// Primary entry point when run as a standalone service.
///
/// ## Responsibilities
/// - Parse command-line arguments
/// - Initialize logging
/// - Optionally seed the store with benchmark data
/// - Start the API server and the observability server
/// - Handle graceful shutdown

use crate::domain::store::MemoryStore;
use crate::infrastructure::observability::ObservabilityServer;
use crate::infrastructure::seed::{seed, SeedConfig};
use crate::interfaces::http::{router, AppContext};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

/// Auction service command-line configuration.
#[derive(Parser, Debug, Clone)]
#[command(name = "bidhouse")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "In-memory auction service", long_about = None)]
pub struct CliConfig {
    /// Address the API server listens on.
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port the API server listens on.
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Port the metrics and health endpoints listen on.
    #[arg(short = 'm', long, default_value_t = 9090)]
    pub metrics_port: u16,

    /// Maximum number of in-flight API requests (0 = number of CPUs x 256).
    #[arg(short = 'c', long, default_value_t = 0)]
    pub max_concurrency: usize,

    /// Populate the store with generated data at startup.
    #[arg(long, default_value_t = false)]
    pub seed: bool,

    /// Number of users to generate when seeding.
    #[arg(long, default_value_t = 100)]
    pub seed_users: usize,

    /// Number of items to generate when seeding.
    #[arg(long, default_value_t = 200)]
    pub seed_items: usize,

    /// RNG seed for reproducible seeding.
    #[arg(long, default_value_t = 42)]
    pub seed_rng: u64,

    /// Log level.
    #[arg(short = 'l', long, default_value = "info", value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: String,

    /// Show the configuration without starting the servers.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

/// Runs the CLI application.
pub async fn run() {
    let config = CliConfig::parse();

    init_logging(&config.log_level);

    tracing::info!("auction service starting");
    tracing::info!("configuration: {:?}", config);

    let max_concurrency = if config.max_concurrency == 0 {
        let cpus = num_cpus::get();
        tracing::info!("detected {} CPU cores", cpus);
        cpus * 256
    } else {
        config.max_concurrency
    };

    println!("========================================");
    println!("  bidhouse auction service v{}", env!("CARGO_PKG_VERSION"));
    println!("========================================");
    println!("API address:      {}:{}", config.host, config.port);
    println!("Metrics port:     {}", config.metrics_port);
    println!("Max concurrency:  {}", max_concurrency);
    println!(
        "Seeding:          {}",
        if config.seed {
            format!("{} users, {} items", config.seed_users, config.seed_items)
        } else {
            "disabled".to_string()
        }
    );
    println!("Log level:        {}", config.log_level);
    println!("========================================");

    if config.dry_run {
        println!("\nDry-run mode - not starting servers");
        return;
    }

    let store = Arc::new(MemoryStore::new());

    if config.seed {
        let seed_config = SeedConfig {
            users: config.seed_users,
            items: config.seed_items,
            rng_seed: config.seed_rng,
            ..SeedConfig::default()
        };
        if let Err(e) = seed(store.as_ref(), &seed_config) {
            tracing::error!("seeding failed: {}", e);
            std::process::exit(1);
        }
    }

    // Observability server on its own port.
    let observability = ObservabilityServer::new(config.metrics_port, store.clone());
    tokio::spawn(async move {
        if let Err(e) = observability.run().await {
            tracing::error!("observability server failed: {}", e);
        }
    });

    let ctx = Arc::new(AppContext::new(store));
    let app = router(ctx, max_concurrency);

    let addr = SocketAddr::new(config.host, config.port);
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("API server listening on {}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("API server failed: {}", e);
        std::process::exit(1);
    }

    tracing::info!("auction service stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    } else {
        tracing::info!("shutdown signal received");
    }
}

/// Initializes the logging system.
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
