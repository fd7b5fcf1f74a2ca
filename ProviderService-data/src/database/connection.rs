//! Database connection module for the provider service
//!
//! SQLite is the only relational backend. A [`DatabasePool`] is built once at
//! startup and handed to every repository that needs it; nothing in this
//! module keeps process-wide state.

use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, OpenFlags};
use tracing::{debug, info};

use super::migrations::run_sqlite_migrations;
use super::DatabaseError;

/// Pooled SQLite connection handed out by [`DatabasePool::get`]
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// SQLite database (file-based)
    Sqlite,
    /// Process-local storage, lost on shutdown
    Memory,
}

impl FromStr for DatabaseType {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(DatabaseType::Sqlite),
            "memory" | "in-memory" => Ok(DatabaseType::Memory),
            _ => Err(DatabaseError::UnsupportedDatabaseType(s.to_string())),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Storage backend (sqlite, memory)
    pub db_type: DatabaseType,
    /// Path to SQLite database file
    pub sqlite_path: String,
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// Connection checkout timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: DatabaseType::Sqlite,
            sqlite_path: "data/provider_service.db".to_string(),
            max_connections: 10,
            timeout_seconds: 30,
        }
    }
}

impl DatabaseConfig {
    /// Create a new database configuration from environment variables
    pub fn from_env() -> Result<Self, DatabaseError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key/value source, falling back to the
    /// defaults for missing keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DatabaseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let db_type = match lookup("DB_TYPE") {
            Some(value) => value.parse()?,
            None => defaults.db_type,
        };

        let sqlite_path = lookup("DB_SQLITE_PATH").unwrap_or(defaults.sqlite_path);

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(value) => parse_positive("DB_MAX_CONNECTIONS", &value)?,
            None => defaults.max_connections,
        };

        let timeout_seconds = match lookup("DB_TIMEOUT_SECONDS") {
            Some(value) => parse_positive("DB_TIMEOUT_SECONDS", &value)?,
            None => defaults.timeout_seconds,
        };

        let config = DatabaseConfig {
            db_type,
            sqlite_path,
            max_connections,
            timeout_seconds,
        };

        debug!(?config, "Database configuration loaded");
        Ok(config)
    }
}

/// Name of the Unicode-aware lowercase SQL function.
///
/// SQLite's built-in `lower` and `LIKE` only fold ASCII letters.
pub const UNICODE_LOWER: &str = "unicode_lower";

/// Register the scalar functions the repositories rely on
pub fn register_sql_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        UNICODE_LOWER,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|v| v.to_lowercase()))
        },
    )
}

fn parse_positive<T>(key: &str, value: &str) -> Result<T, DatabaseError>
where
    T: FromStr + PartialOrd + Default,
{
    match value.trim().parse::<T>() {
        Ok(parsed) if parsed > T::default() => Ok(parsed),
        _ => Err(DatabaseError::ConfigError(format!(
            "{} must be a positive integer, got '{}'",
            key, value
        ))),
    }
}

/// Shared handle to the SQLite connection pool.
///
/// Cloning is cheap; every clone points at the same pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: r2d2::Pool<SqliteConnectionManager>,
}

impl DatabasePool {
    /// Open (or create) the SQLite file named by the configuration and run migrations
    pub fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        info!("Initializing SQLite database at: {}", config.sqlite_path);

        if let Some(parent) = Path::new(&config.sqlite_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                info!("Creating parent directory: {:?}", parent);
                fs::create_dir_all(parent).map_err(|e| {
                    DatabaseError::ConnectionError(format!(
                        "cannot create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let manager = SqliteConnectionManager::file(&config.sqlite_path)
            .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE);

        let builder = r2d2::Pool::builder()
            .max_size(config.max_connections)
            .connection_timeout(Duration::from_secs(config.timeout_seconds));

        Self::build(builder, manager)
    }

    /// Create a pool over a private in-memory SQLite database.
    ///
    /// Every `:memory:` connection is its own database, so the pool is pinned
    /// to a single connection that is never recycled.
    pub fn in_memory() -> Result<Self, DatabaseError> {
        info!("Initializing in-memory SQLite database");

        let builder = r2d2::Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connection_timeout(Duration::from_secs(30));

        Self::build(builder, SqliteConnectionManager::memory())
    }

    fn build(
        builder: r2d2::Builder<SqliteConnectionManager>,
        manager: SqliteConnectionManager,
    ) -> Result<Self, DatabaseError> {
        let manager = manager.with_init(|conn| {
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            register_sql_functions(conn)
        });
        let pool = builder.build(manager)?;

        {
            let conn = pool.get()?;
            run_sqlite_migrations(&conn)?;
        }

        info!("SQLite connection pool created successfully");
        Ok(Self { pool })
    }

    /// Check out a connection from the pool
    pub fn get(&self) -> Result<PooledConnection, DatabaseError> {
        Ok(self.pool.get()?)
    }

    /// Round-trip a trivial query to prove the database answers
    pub fn ping(&self) -> Result<(), DatabaseError> {
        let conn = self.get()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    /// Human-readable description of the database and pool usage
    pub fn connection_info(&self) -> Result<String, DatabaseError> {
        let conn = self.get()?;
        let path: String = conn.query_row("PRAGMA database_list", [], |row| row.get(2))?;

        let location = if path.is_empty() || path == ":memory:" {
            "SQLite in-memory database".to_string()
        } else {
            format!("SQLite database at {}", path)
        };

        let state = self.pool.state();
        Ok(format!(
            "{} (connections: active={}, idle={})",
            location, state.connections, state.idle_connections
        ))
    }
}
