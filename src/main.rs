use clap::Parser;
use lead_site::{AppState, Args, build_router};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env has to be loaded before clap reads the environment
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lead_site=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "Loaded environment file"),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!(error = %e, "Failed to load .env file"),
    }

    // parse cli arguments
    let args = Args::parse();
    let state = AppState::from_args(&args)?;

    tracing::info!(
        services = state.catalog.services().len(),
        leads_file = %args.leads_file.display(),
        static_dir = %args.static_dir.display(),
        "Site content loaded"
    );
    tracing::info!(
        max = args.rate_limit,
        window_secs = args.rate_window,
        trust_forwarded_for = args.trust_forwarded_for,
        "Submission rate limit"
    );

    let app = build_router(state, &args.static_dir);

    let listener = tokio::net::TcpListener::bind(args.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Site running");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // keep serving, we just can't be stopped gracefully
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
