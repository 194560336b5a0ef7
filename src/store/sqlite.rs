// Copyright 2025 Cowboy AI, LLC.

//! SQLite store
//!
//! One `rusqlite` connection behind a mutex; every call runs on the blocking
//! pool. Writes that touch more than one statement run in a transaction so
//! that each store call stays atomic.

use super::CatStore;
use crate::commands::CreateCat;
use crate::entity::{Breed, BreedId, Cat, CatId, CatRecord, EntityId, NewBreed};
use crate::errors::StoreError;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS cat_breed (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    description TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS cat (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    name     TEXT NOT NULL,
    age      INTEGER NOT NULL,
    breed_id INTEGER NOT NULL REFERENCES cat_breed(id) ON DELETE RESTRICT
);
CREATE INDEX IF NOT EXISTS idx_cat_breed_id ON cat(breed_id);
CREATE INDEX IF NOT EXISTS idx_cat_breed_name ON cat_breed(name);
";

const SELECT_CAT: &str = "
SELECT c.id, c.name, c.age, c.breed_id, b.id, b.name, b.description
FROM cat c
JOIN cat_breed b ON b.id = c.breed_id";

/// Raw columns of a joined cat row
struct CatRow {
    id: i64,
    name: String,
    age: i64,
    breed: BreedRow,
}

struct BreedRow {
    id: i64,
    name: String,
    description: String,
}

impl CatRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            age: row.get(2)?,
            breed: BreedRow {
                id: row.get(4)?,
                name: row.get(5)?,
                description: row.get(6)?,
            },
        })
    }
}

impl BreedRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
        })
    }
}

fn stored_id<T>(raw: i64) -> Result<EntityId<T>, StoreError> {
    EntityId::new(raw).ok_or_else(|| StoreError::Backend(format!("stored id {raw} is not positive")))
}

impl TryFrom<BreedRow> for Breed {
    type Error = StoreError;

    fn try_from(row: BreedRow) -> Result<Self, Self::Error> {
        Ok(Breed {
            id: stored_id(row.id)?,
            name: row.name,
            description: row.description,
        })
    }
}

impl TryFrom<CatRow> for Cat {
    type Error = StoreError;

    fn try_from(row: CatRow) -> Result<Self, Self::Error> {
        let age = u16::try_from(row.age)
            .map_err(|_| StoreError::Backend(format!("stored age {} out of range", row.age)))?;
        Ok(Cat::new(stored_id(row.id)?, row.name, age, row.breed.try_into()?))
    }
}

fn select_cat(conn: &Connection, id: i64) -> Result<Option<Cat>, StoreError> {
    conn.query_row(&format!("{SELECT_CAT} WHERE c.id = ?1"), params![id], CatRow::read)
        .optional()?
        .map(Cat::try_from)
        .transpose()
}

fn cat_not_found(id: i64) -> StoreError {
    StoreError::RowNotFound { entity: "cat", id }
}

/// Cats and breeds in a SQLite database
#[derive(Clone)]
pub struct SqliteCatStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCatStore {
    /// Open (or create) the database at `path` and apply the schema
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "opened sqlite store");
        Self::with_connection(conn)
    }

    /// A private in-memory database
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<F, R>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut Connection) -> Result<R, StoreError> + Send + 'static,
        R: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| StoreError::Backend("sqlite connection lock poisoned".to_string()))?;
            f(&mut *guard)
        })
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?
    }
}

#[async_trait]
impl CatStore for SqliteCatStore {
    async fn find_breed(&self, id: BreedId) -> Result<Option<Breed>, StoreError> {
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT id, name, description FROM cat_breed WHERE id = ?1",
                params![id.get()],
                BreedRow::read,
            )
            .optional()?
            .map(Breed::try_from)
            .transpose()
        })
        .await
    }

    async fn find_cat(&self, id: CatId) -> Result<Option<Cat>, StoreError> {
        self.with_conn(move |conn| select_cat(conn, id.get())).await
    }

    async fn list_cats(&self) -> Result<Vec<Cat>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_CAT} ORDER BY c.id"))?;
            let rows = stmt.query_map([], CatRow::read)?;
            rows.map(|row| Cat::try_from(row?)).collect()
        })
        .await
    }

    async fn list_breeds(&self) -> Result<Vec<Breed>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, description FROM cat_breed ORDER BY name ASC, id ASC")?;
            let rows = stmt.query_map([], BreedRow::read)?;
            rows.map(|row| Breed::try_from(row?)).collect()
        })
        .await
    }

    async fn create_cat(&self, cat: &CreateCat) -> Result<Cat, StoreError> {
        let cat = cat.clone();
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO cat (name, age, breed_id) VALUES (?1, ?2, ?3)",
                params![cat.name, cat.age, cat.breed_id.get()],
            )?;
            let id = tx.last_insert_rowid();
            let created = select_cat(&tx, id)?.ok_or_else(|| cat_not_found(id))?;
            tx.commit()?;
            debug!(cat_id = id, "inserted cat");
            Ok(created)
        })
        .await
    }

    async fn update_cat(&self, cat: &CatRecord) -> Result<Cat, StoreError> {
        let cat = cat.clone();
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            let changed = tx.execute(
                "UPDATE cat SET name = ?1, age = ?2, breed_id = ?3 WHERE id = ?4",
                params![cat.name, cat.age, cat.breed_id.get(), cat.id.get()],
            )?;
            if changed == 0 {
                return Err(cat_not_found(cat.id.get()));
            }
            let updated = select_cat(&tx, cat.id.get())?.ok_or_else(|| cat_not_found(cat.id.get()))?;
            tx.commit()?;
            Ok(updated)
        })
        .await
    }

    async fn delete_cat(&self, id: CatId) -> Result<Cat, StoreError> {
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            let deleted = select_cat(&tx, id.get())?.ok_or_else(|| cat_not_found(id.get()))?;
            tx.execute("DELETE FROM cat WHERE id = ?1", params![id.get()])?;
            tx.commit()?;
            Ok(deleted)
        })
        .await
    }

    async fn create_breed(&self, breed: &NewBreed) -> Result<Breed, StoreError> {
        let breed = breed.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO cat_breed (name, description) VALUES (?1, ?2)",
                params![breed.name, breed.description],
            )?;
            Ok(Breed {
                id: stored_id(conn.last_insert_rowid())?,
                name: breed.name,
                description: breed.description,
            })
        })
        .await
    }

    async fn count_breeds(&self) -> Result<usize, StoreError> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM cat_breed", [], |row| row.get(0))?;
            usize::try_from(count).map_err(|e| StoreError::Backend(e.to_string()))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let store = SqliteCatStore::open_in_memory().unwrap();
        store
            .with_conn(|conn| Ok(conn.execute_batch(SCHEMA)?))
            .await
            .unwrap();
        assert_eq!(store.count_breeds().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_breed_via_foreign_key() {
        let store = SqliteCatStore::open_in_memory().unwrap();
        let breed = store
            .create_breed(&NewBreed::new("Siamese", "Known for their blue eyes."))
            .await
            .unwrap();
        let cat = store
            .create_cat(&CreateCat {
                name: "Kitty".to_string(),
                age: 2,
                breed_id: breed.id,
            })
            .await
            .unwrap();

        let mut record = cat.record();
        record.breed_id = BreedId::new(77).unwrap();
        let err = store.update_cat(&record).await.unwrap_err();

        assert!(matches!(err, StoreError::ForeignKeyViolation(_)));
        assert_eq!(store.find_cat(cat.id).await.unwrap(), Some(cat));
    }
}
