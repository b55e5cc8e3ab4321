//! Database bootstrap entrypoint.
//!
//! Connects to the database named by `DATABASE_URL` and creates the schema
//! (tables plus the unique indexes the core relies on). A transport layer
//! serving the `core` operations runs this once before first start.

use matplan::config::database;
use matplan::errors::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Non-fatal: env vars can also be set externally
    dotenvy::dotenv().ok();

    let url = database::get_database_url();
    info!(%url, "connecting to database");
    let db = database::create_connection().await?;

    database::create_tables(&db).await?;
    info!("database schema is ready");

    Ok(())
}
