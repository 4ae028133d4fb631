use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use time_tracker::{
    AppState,
    auth::{password::BcryptEncryptor, token::JwtTokenHandler},
    config::Config,
    ids::IdGenerator,
    router::build_router,
    store::mongo::MongoStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    // an unreachable store at startup is the only fatal failure mode
    let store = MongoStore::connect(&config.database_url, &config.database_name)
        .await
        .expect("failed to connect to the document store");
    store
        .ensure_indexes()
        .await
        .expect("failed to create store indexes");

    let state = AppState {
        store: Arc::new(store),
        tokens: Arc::new(JwtTokenHandler::new(&config.jwt_secret)),
        encryptor: Arc::new(BcryptEncryptor),
        ids: IdGenerator::new(),
        config: config.clone(),
    };

    let app = build_router(state);

    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("invalid server_host, falling back to the unspecified address");
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    tracing::info!("server listening on {}", addr);

    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("failed to bind"),
        app,
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("failed to start server");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received, closing application");
}
