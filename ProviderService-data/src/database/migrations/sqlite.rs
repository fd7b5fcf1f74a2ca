use rusqlite::Connection;
use tracing::info;

use crate::database::DatabaseError;

/// Run SQLite migrations
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    info!("Running SQLite migrations");

    create_practices_table(conn)?;
    create_providers_table(conn)?;
    create_provider_practice_index(conn)?;

    info!("SQLite migrations completed successfully");
    Ok(())
}

/// Create the practices table
fn create_practices_table(conn: &Connection) -> Result<(), DatabaseError> {
    info!("Creating practices table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS practices (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT,
            address TEXT,
            phone_number TEXT,
            website TEXT
        )",
        [],
    )
    .map_err(|e| DatabaseError::MigrationError(format!("practices table: {}", e)))?;

    Ok(())
}

/// Create the providers table.
///
/// Deleting a practice detaches its providers instead of failing.
fn create_providers_table(conn: &Connection) -> Result<(), DatabaseError> {
    info!("Creating providers table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS providers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT,
            specialty TEXT,
            address TEXT,
            phone_number TEXT,
            practice_id INTEGER REFERENCES practices (id) ON DELETE SET NULL
        )",
        [],
    )
    .map_err(|e| DatabaseError::MigrationError(format!("providers table: {}", e)))?;

    Ok(())
}

/// Create index on the practice reference
fn create_provider_practice_index(conn: &Connection) -> Result<(), DatabaseError> {
    info!("Creating index on providers.practice_id");

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_providers_practice_id
        ON providers (practice_id)",
        [],
    )
    .map_err(|e| DatabaseError::MigrationError(format!("Failed to create index: {}", e)))?;

    Ok(())
}
