use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_api::auth::password::hash_password;
use folio_api::config::ServerConfig;
use folio_api::router::build_app_router;
use folio_api::state::AppState;
use folio_db::models::user::CreateUser;
use folio_db::repositories::UserRepo;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = folio_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    folio_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    folio_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Admin account ---
    seed_admin_user(&pool, &config).await;

    // --- Outbound metadata client ---
    let sources_config = folio_sources::SourceConfig::from_env();
    let sources = Arc::new(
        folio_sources::SourceClient::new(sources_config)
            .expect("Failed to build the metadata HTTP client"),
    );

    // --- Contact relay ---
    let mailer = match folio_mailer::EmailConfig::from_env() {
        Some(email_config) => {
            tracing::info!(host = %email_config.smtp_host, "Contact relay configured");
            Some(Arc::new(folio_mailer::Mailer::new(email_config)))
        }
        None => {
            tracing::warn!("SMTP_HOST not set; contact relay disabled");
            None
        }
    };

    // --- App state / router ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        sources,
        mailer,
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Create the admin account on first start when `ADMIN_PASSWORD` is set.
///
/// Existing accounts are left untouched; without a configured password no
/// account is created and login stays unavailable.
async fn seed_admin_user(pool: &folio_db::DbPool, config: &ServerConfig) {
    let Some(password) = &config.admin_password else {
        tracing::warn!("ADMIN_PASSWORD not set; skipping admin account seeding");
        return;
    };

    match UserRepo::find_by_username(pool, &config.admin_username).await {
        Ok(Some(_)) => {
            tracing::info!(username = %config.admin_username, "Admin account already exists");
        }
        Ok(None) => {
            let password_hash = hash_password(password).expect("Failed to hash admin password");
            UserRepo::create(
                pool,
                &CreateUser {
                    username: config.admin_username.clone(),
                    password_hash,
                },
            )
            .await
            .expect("Failed to create admin account");
            tracing::info!(username = %config.admin_username, "Admin account created");
        }
        Err(e) => panic!("Failed to look up admin account: {e}"),
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
