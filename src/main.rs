use clap::Parser;
use std::sync::Arc;

use random_image_server::cli::Cli;
use random_image_server::config::{AppState, Config};
use random_image_server::{logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut cfg = match Config::load_from(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("[FATAL] {e}");
            std::process::exit(1);
        }
    };
    cfg.logging.verbose = cli.verbose;

    logger::init(&cfg)?;

    // Create the Tokio runtime, sizing worker threads from the configuration
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;
    let bound = listener.local_addr()?;

    logger::log_server_start(&bound, &cfg);

    let state = Arc::new(AppState::new(cfg));
    server::start_server_loop(listener, state, server::shutdown_signal()).await;
    Ok(())
}
