use clap::Parser;
use rbac_admin::{
    api::AdminApi,
    cli::{commands::execute, Cli},
    clock::SystemClock,
    config::Config,
    observability::init_tracing,
    store,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load()?;
    config.validate()?;

    // Initialize tracing/logging
    init_tracing(&config.observability);
    tracing::debug!("Configuration loaded: {:?}", config.store);

    let backend = store::open(&config.store).await?;
    let api = AdminApi::with_backend(
        backend,
        config.store.key_prefix.clone(),
        Arc::new(SystemClock),
    );

    match execute(&api, cli.command, &config.observability).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            tracing::error!(kind = e.kind(), "Command failed: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
