use pinmap::config::Config;
use pinmap::engine::{self, Session};
use pinmap::error::Error;
use pinmap::server::serve;
use pinmap::surface::MemorySurface;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;
    let provider = config.directions_provider()?;

    tracing::info!(
        "starting with {:?} directions, {} mode",
        config.directions,
        config.transport_mode
    );

    let surface = MemorySurface::new(config.viewport());
    let session = Session::new(surface, config.transport_mode);
    let handle = engine::spawn(session, provider);

    serve(handle, config.listen_addr).await
}
