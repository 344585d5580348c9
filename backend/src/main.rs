//! R4C Robot Factory - Backend Server
//!
//! Registers produced robots, notifies customers waiting for them and serves
//! weekly production reports.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use robot_factory_backend::{
    create_app,
    repositories::{PgOrderRepository, PgRobotRepository},
    services::{SerialPool, SmtpMailer},
    AppState, Config,
};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "r4c_server=debug,robot_factory_backend=debug,tower_http=debug,sqlx=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting R4C Robot Factory Server");
    tracing::info!("Environment: {}", config.environment);

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database.url)
        .await?;

    tracing::info!("Database connection established");

    // Run migrations in development
    if config.environment == "development" {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&db_pool).await?;
        tracing::info!("Migrations completed");
    }

    let serial_pool = SerialPool::new(&config.serials.file_path);
    if !serial_pool.exists().await {
        tracing::warn!(
            path = %config.serials.file_path.display(),
            "Serial code file not found, robot registration will fail until it is created"
        );
    }

    let mailer = SmtpMailer::from_config(&config.email)?;

    // Create application state
    let state = AppState {
        robots: Arc::new(PgRobotRepository::new(db_pool.clone())),
        orders: Arc::new(PgOrderRepository::new(db_pool.clone())),
        db: db_pool,
        config: Arc::new(config.clone()),
        serial_pool: serial_pool.shared(),
        mailer: Arc::new(mailer),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
