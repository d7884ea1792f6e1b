use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use sso_service::config::Config;
use sso_service::domain::auth::service::AuthService;
use sso_service::inbound::grpc::AuthGrpcService;
use sso_service::outbound::repositories;
use sso_service::outbound::repositories::SqliteAppRepository;
use sso_service::outbound::repositories::SqliteUserRepository;
use sso_service::proto::auth_server::AuthServer;
use tonic::transport::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const ENV_LOCAL: &str = "local";
const ENV_DEV: &str = "dev";
const ENV_PROD: &str = "prod";

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::load()?;

    init_tracing(&config.env);

    tracing::info!(
        service = "sso-service",
        version = env!("CARGO_PKG_VERSION"),
        env = %config.env,
        "Service starting"
    );

    tracing::info!(
        storage_path = %config.storage_path,
        grpc_port = config.grpc.port,
        grpc_timeout_secs = config.grpc.timeout_secs,
        token_ttl_secs = config.auth.token_ttl_secs,
        min_password_length = config.auth.min_password_length,
        "Configuration loaded"
    );

    if let Some(parent) = Path::new(&config.storage_path).parent() {
        if !config.storage_path.starts_with("sqlite:") && !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let pool = repositories::connect(&config.storage_path, 5).await?;
    tracing::info!(max_connections = 5, database = "sqlite", "Database pool created");

    repositories::MIGRATOR.run(&pool).await?;
    tracing::info!(database = "sqlite", "Database migrations completed");

    let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let app_repository = Arc::new(SqliteAppRepository::new(pool));

    let settings = config.auth_settings();
    let auth_service = Arc::new(AuthService::new(
        tracing::info_span!("auth"),
        settings,
        Arc::clone(&user_repository),
        user_repository,
        app_repository,
    ));

    let grpc_address = format!("0.0.0.0:{}", config.grpc.port).parse()?;
    let grpc_service = AuthGrpcService::new(auth_service);
    tracing::info!(
        address = %grpc_address,
        port = config.grpc.port,
        protocol = "grpc",
        "gRpc server listening"
    );

    Server::builder()
        .timeout(Duration::from_secs(config.grpc.timeout_secs))
        .add_service(AuthServer::new(grpc_service))
        .serve_with_shutdown(grpc_address, shutdown_signal())
        .await?;

    tracing::info!("Service stopped");
    Ok(())
}

/// Human-readable logs locally, JSON lines in production.
fn init_tracing(env: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sso_service=debug,auth=info".into());

    let registry = tracing_subscriber::registry().with(filter);

    match env {
        ENV_PROD => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        ENV_DEV => registry
            .with(tracing_subscriber::fmt::layer().with_ansi(false))
            .init(),
        ENV_LOCAL => registry.with(tracing_subscriber::fmt::layer()).init(),
        other => {
            registry.with(tracing_subscriber::fmt::layer()).init();
            tracing::warn!(env = other, "Unknown env, using local log format");
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!(signal = "SIGINT", "Stopping application"),
        _ = terminate => tracing::info!(signal = "SIGTERM", "Stopping application"),
    }
}
