//! Applies the PostgreSQL schema without starting the server.
//!
//! Idempotent: every statement is `CREATE ... IF NOT EXISTS`.

use anyhow::Result;
use curricula_storage::PgStorage;

use super::database_url;

pub(crate) async fn run() -> Result<()> {
    // Connecting runs the migrations.
    let storage = PgStorage::new(&database_url()?).await?;
    storage.pool().close().await;
    println!("Migrations applied.");
    Ok(())
}
