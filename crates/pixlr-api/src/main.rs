use pixlr_api::constants::SERVICE_NAME;
use pixlr_core::Config;

// Use mimalloc as the global allocator for lower fragmentation,
// especially when running on musl-based systems inside containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    pixlr_infra::init_telemetry(SERVICE_NAME, &config.environment)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    let (_state, router) = pixlr_api::setup::initialize_app(config.clone()).await?;

    pixlr_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
