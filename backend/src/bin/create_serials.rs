//! One-time creation of the serial code pool file.
//!
//! Writes codes A0001 through J9999 to the configured path. Refuses to run
//! when the file already exists, since that would reissue codes.

use robot_factory_backend::{services::SerialPool, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "create_serials=info,robot_factory_backend=info".into()),
        )
        .init();

    dotenvy::dotenv().ok();
    let config = Config::load()?;

    let pool = SerialPool::new(&config.serials.file_path);
    let count = pool.create().await?;

    println!(
        "Created {} serial codes in {}",
        count,
        config.serials.file_path.display()
    );
    Ok(())
}
