use rusqlite::{Connection, OptionalExtension};

use crate::Error;

use super::KeyValueStore;

/// Create the key_value table in the database.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_key_value_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS key_value (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// A [KeyValueStore] backed by a SQLite database.
#[derive(Debug)]
pub struct SQLiteKeyValueStore {
    connection: Connection,
}

impl SQLiteKeyValueStore {
    /// Create a store on `connection`, creating the key_value table if needed.
    ///
    /// # Errors
    /// Returns an error if the table could not be created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        create_key_value_table(&connection)?;

        Ok(Self { connection })
    }
}

impl KeyValueStore for SQLiteKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.connection
            .query_row(
                "SELECT value FROM key_value WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Error::from)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.connection.execute(
            "INSERT INTO key_value (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;

        Ok(())
    }
}
