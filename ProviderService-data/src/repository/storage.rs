use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use crate::database::{DatabasePool, UNICODE_LOWER};
use crate::models::{NewPracticeRecord, NewProviderRecord, PracticeRecord, ProviderRecord};
use super::errors::RepositoryError;

const PRACTICE_COLUMNS: &str = "id, name, address, phone_number, website";
const PROVIDER_COLUMNS: &str = "id, name, specialty, address, phone_number, practice_id";

/// SQL operations for practices and providers.
///
/// Every function here is synchronous and takes a borrowed connection;
/// [`DatabaseStorage::with_connection`] moves them onto the blocking pool.
pub struct DatabaseStorage;

impl DatabaseStorage {
    /// Check out a pooled connection and run `operation` on tokio's blocking pool
    pub async fn with_connection<T, F>(pool: &DatabasePool, operation: F) -> Result<T, RepositoryError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, RepositoryError> + Send + 'static,
    {
        let pool = pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            operation(&conn)
        })
        .await?
    }

    pub fn find_all_practices(conn: &Connection) -> Result<Vec<PracticeRecord>, RepositoryError> {
        debug!("Selecting all practices");

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM practices ORDER BY id",
            PRACTICE_COLUMNS
        ))?;
        let practices = stmt
            .query_map([], practice_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(practices)
    }

    pub fn find_practice_by_id(conn: &Connection, id: i64) -> Result<Option<PracticeRecord>, RepositoryError> {
        debug!("Selecting practice: id={}", id);

        let practice = conn
            .query_row(
                &format!("SELECT {} FROM practices WHERE id = ?1", PRACTICE_COLUMNS),
                [id],
                practice_from_row,
            )
            .optional()?;

        Ok(practice)
    }

    pub fn insert_practice(conn: &Connection, practice: NewPracticeRecord) -> Result<PracticeRecord, RepositoryError> {
        conn.execute(
            "INSERT INTO practices (name, address, phone_number, website)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                practice.name,
                practice.address,
                practice.phone_number,
                practice.website,
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!("Inserted practice: id={}", id);
        Ok(practice.with_id(id))
    }

    /// Insert the row, or overwrite every column of the row with the same id
    pub fn save_practice(conn: &Connection, practice: PracticeRecord) -> Result<PracticeRecord, RepositoryError> {
        debug!("Saving practice: id={}", practice.id);

        conn.execute(
            "INSERT INTO practices (id, name, address, phone_number, website)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                address = excluded.address,
                phone_number = excluded.phone_number,
                website = excluded.website",
            params![
                practice.id,
                practice.name,
                practice.address,
                practice.phone_number,
                practice.website,
            ],
        )?;

        Ok(practice)
    }

    /// Overwrite every column of an existing row; `None` when no row has this id
    pub fn update_practice(conn: &Connection, practice: PracticeRecord) -> Result<Option<PracticeRecord>, RepositoryError> {
        let updated = conn.execute(
            "UPDATE practices
             SET name = ?2, address = ?3, phone_number = ?4, website = ?5
             WHERE id = ?1",
            params![
                practice.id,
                practice.name,
                practice.address,
                practice.phone_number,
                practice.website,
            ],
        )?;

        debug!("Updated practice: id={}, rows={}", practice.id, updated);
        Ok((updated > 0).then_some(practice))
    }

    pub fn delete_practice(conn: &Connection, id: i64) -> Result<bool, RepositoryError> {
        let deleted = conn.execute("DELETE FROM practices WHERE id = ?1", [id])?;
        debug!("Deleted practice: id={}, rows={}", id, deleted);
        Ok(deleted > 0)
    }

    pub fn find_all_providers(conn: &Connection) -> Result<Vec<ProviderRecord>, RepositoryError> {
        debug!("Selecting all providers");

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM providers ORDER BY id",
            PROVIDER_COLUMNS
        ))?;
        let providers = stmt
            .query_map([], provider_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(providers)
    }

    pub fn find_provider_by_id(conn: &Connection, id: i64) -> Result<Option<ProviderRecord>, RepositoryError> {
        debug!("Selecting provider: id={}", id);

        let provider = conn
            .query_row(
                &format!("SELECT {} FROM providers WHERE id = ?1", PROVIDER_COLUMNS),
                [id],
                provider_from_row,
            )
            .optional()?;

        Ok(provider)
    }

    /// Providers whose specialty contains `fragment`, ignoring case.
    ///
    /// Both sides are folded with the Unicode-aware [`UNICODE_LOWER`] function
    /// and compared with `instr`, so `%` and `_` in the fragment are literal.
    /// A missing specialty counts as the empty string, so an empty fragment
    /// matches every provider.
    pub fn find_providers_by_specialty(conn: &Connection, fragment: &str) -> Result<Vec<ProviderRecord>, RepositoryError> {
        debug!("Selecting providers by specialty fragment: {:?}", fragment);

        let mut stmt = conn.prepare(&format!(
            "SELECT {columns} FROM providers
             WHERE instr({lower}(COALESCE(specialty, '')), {lower}(?1)) > 0
             ORDER BY id",
            columns = PROVIDER_COLUMNS,
            lower = UNICODE_LOWER,
        ))?;
        let providers = stmt
            .query_map([fragment], provider_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(providers)
    }

    pub fn insert_provider(conn: &Connection, provider: NewProviderRecord) -> Result<ProviderRecord, RepositoryError> {
        conn.execute(
            "INSERT INTO providers (name, specialty, address, phone_number, practice_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                provider.name,
                provider.specialty,
                provider.address,
                provider.phone_number,
                provider.practice_id,
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!("Inserted provider: id={}", id);
        Ok(provider.with_id(id))
    }

    /// Insert the row, or overwrite every column of the row with the same id
    pub fn save_provider(conn: &Connection, provider: ProviderRecord) -> Result<ProviderRecord, RepositoryError> {
        debug!("Saving provider: id={}", provider.id);

        conn.execute(
            "INSERT INTO providers (id, name, specialty, address, phone_number, practice_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                specialty = excluded.specialty,
                address = excluded.address,
                phone_number = excluded.phone_number,
                practice_id = excluded.practice_id",
            params![
                provider.id,
                provider.name,
                provider.specialty,
                provider.address,
                provider.phone_number,
                provider.practice_id,
            ],
        )?;

        Ok(provider)
    }

    /// Overwrite every column of an existing row; `None` when no row has this id
    pub fn update_provider(conn: &Connection, provider: ProviderRecord) -> Result<Option<ProviderRecord>, RepositoryError> {
        let updated = conn.execute(
            "UPDATE providers
             SET name = ?2, specialty = ?3, address = ?4, phone_number = ?5, practice_id = ?6
             WHERE id = ?1",
            params![
                provider.id,
                provider.name,
                provider.specialty,
                provider.address,
                provider.phone_number,
                provider.practice_id,
            ],
        )?;

        debug!("Updated provider: id={}, rows={}", provider.id, updated);
        Ok((updated > 0).then_some(provider))
    }

    pub fn delete_provider(conn: &Connection, id: i64) -> Result<bool, RepositoryError> {
        let deleted = conn.execute("DELETE FROM providers WHERE id = ?1", [id])?;
        debug!("Deleted provider: id={}, rows={}", id, deleted);
        Ok(deleted > 0)
    }
}

fn practice_from_row(row: &Row<'_>) -> rusqlite::Result<PracticeRecord> {
    Ok(PracticeRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        phone_number: row.get(3)?,
        website: row.get(4)?,
    })
}

fn provider_from_row(row: &Row<'_>) -> rusqlite::Result<ProviderRecord> {
    Ok(ProviderRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        specialty: row.get(2)?,
        address: row.get(3)?,
        phone_number: row.get(4)?,
        practice_id: row.get(5)?,
    })
}
