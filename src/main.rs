use tally::config::Config;
use tally::server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(version = tally::VERSION, "Starting Tally on {}", config.address());

    let (host, port) = (config.host.clone(), config.port);
    let (_state, app) = server::build_app(config)?;
    let (port, handle) = server::serve(app, &host, port).await?;

    tracing::info!("Listening on http://{}:{}", host, port);

    handle.await??;
    Ok(())
}
