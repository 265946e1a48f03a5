//! Synthetic Request Workload CLI
//!
//! Runs the work simulation loop and exposes its runtime metrics over
//! HTTP for external monitoring systems to scrape.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use worksim::{
    export::{MetricsExporter, MetricsServer, MetricsServerConfig},
    telemetry::WorkMetrics,
    workload::{FileConfig, RandomCycleSource, ShutdownSignal, WorkloadRunner},
};

#[derive(Debug, Parser)]
#[command(name = "worksim", version, about = "Synthetic request workload with live metrics export")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the metrics server port.
    #[arg(long)]
    port: Option<u16>,

    /// Seed the workload for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of cycles to run (0 = run until interrupted).
    #[arg(long, default_value_t = 0)]
    cycles: u64,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    info!("Worksim v{}", worksim::VERSION);

    let config = match cli.config {
        Some(ref path) => match FileConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };

    let port = cli.port.unwrap_or(config.export.port);
    let metrics = Arc::new(WorkMetrics::new());

    // Register the metrics before the loop starts. A registration
    // failure is fatal: the process has done no useful work yet.
    let exporter = match MetricsExporter::new() {
        Ok(exporter) => exporter,
        Err(e) => {
            eprintln!("Failed to register metrics: {}", e);
            std::process::exit(1);
        }
    };

    let server = MetricsServer::new(
        MetricsServerConfig::with_port(port),
        exporter,
        Arc::clone(&metrics),
    );
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                eprintln!("Failed to start metrics runtime: {}", e);
                std::process::exit(1);
            }
        };
        if let Err(e) = runtime.block_on(server.run()) {
            eprintln!("Metrics server failed: {}", e);
            std::process::exit(1);
        }
    });

    let shutdown = ShutdownSignal::new();
    {
        let shutdown = shutdown.clone();
        if let Err(e) = ctrlc::set_handler(move || shutdown.trigger()) {
            warn!("Failed to install Ctrl-C handler: {}", e);
        }
    }

    let source = match cli.seed {
        Some(seed) => {
            info!(seed, "Using fixed workload seed");
            RandomCycleSource::from_seed_value(seed, &config.workload)
        }
        None => RandomCycleSource::from_os_entropy(&config.workload),
    };

    info!("Simulating work and exposing metrics...");

    let mut runner = WorkloadRunner::new(config.workload, source, metrics, shutdown);
    if cli.cycles > 0 {
        runner.run_cycles(cli.cycles);
    } else {
        runner.run();
    }

    info!("Done");
}
