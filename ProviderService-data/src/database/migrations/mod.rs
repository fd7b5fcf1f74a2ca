// Database migrations
// Every statement is idempotent, so migrations run on each pool start.

mod sqlite;
pub use sqlite::run_migrations as run_sqlite_migrations;
