use std::future::IntoFuture;
use std::sync::Arc;

use auth::Authenticator;
use auth::TokenCodec;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::oneshot;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_service::config::Config;
use user_service::inbound::http::router::create_router;
use user_service::inbound::http::shutdown::shutdown_signal;
use user_service::outbound::repositories::PostgresUserRepository;
use user_service::session::service::SessionService;
use user_service::user::service::UserService;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let lifetimes = config.token_lifetimes()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        access_token_ttl_minutes = config.jwt.access_token_ttl_minutes,
        refresh_token_ttl_minutes = config.jwt.refresh_token_ttl_minutes,
        shutdown_timeout_secs = config.server.shutdown_timeout_secs,
        "Configuration loaded"
    );

    if config.jwt.secret.is_empty() {
        tracing::warn!("JWT secret is empty; every login and refresh will fail");
    }

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        TokenCodec::new(config.jwt.secret.as_bytes()),
        lifetimes,
    ));
    let validator = Arc::new(config.validator());
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repository),
        config.validator(),
    ));
    let session_service = Arc::new(SessionService::new(
        user_repository,
        Arc::clone(&authenticator),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, session_service, authenticator, validator);

    // In-flight requests get `shutdown_timeout` to finish once a signal arrives.
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();
    let http_server = axum::serve(http_listener, http_application)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = signalled_tx.send(());
        })
        .into_future();

    let shutdown_timeout = config.shutdown_timeout();
    let grace_period = async move {
        if signalled_rx.await.is_ok() {
            tokio::time::sleep(shutdown_timeout).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = http_server => {
            result?;
            tracing::info!("Server exited successfully");
        }
        () = grace_period => {
            tracing::warn!(
                timeout_secs = shutdown_timeout.as_secs(),
                "Shutdown timeout elapsed, dropping open connections"
            );
        }
    }

    Ok(())
}
