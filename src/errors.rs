// Copyright 2025 Cowboy AI, LLC.

//! Error types for cat lifecycle operations and the stores behind them

use crate::entity::{BreedId, CatId};
use crate::validation::ValidationErrors;
use thiserror::Error;

/// Errors reported by a [`CatStore`](crate::store::CatStore)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The addressed row does not exist
    #[error("Row not found: {entity} with id {id}")]
    RowNotFound {
        /// Table or entity kind that was searched
        entity: &'static str,
        /// Id that was searched for
        id: i64,
    },

    /// A write referenced a row that does not exist
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Any other backend failure
    #[error("Store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Check if this is the "row not found" condition
    pub fn is_row_not_found(&self) -> bool {
        matches!(self, StoreError::RowNotFound { .. })
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(code, message)
                if code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
            {
                StoreError::ForeignKeyViolation(
                    message.unwrap_or_else(|| "FOREIGN KEY constraint failed".to_string()),
                )
            }
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// Errors that can occur in cat lifecycle operations
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// One or more field rules failed on an inbound command
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// The breed does not exist or the policy rejected it
    #[error("Invalid breed selection")]
    InvalidBreedSelection {
        /// Breed that was asked for
        breed_id: BreedId,
    },

    /// The referenced cat does not exist
    #[error("Cat not found: {id}")]
    CatNotFound {
        /// Id that was searched for
        id: CatId,
    },

    /// Any store failure other than the handled "row not found"
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::CatNotFound { .. })
    }

    /// Check if this is a client error (bad input or rejected breed)
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            DomainError::Validation(_) | DomainError::InvalidBreedSelection { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = DomainError::InvalidBreedSelection {
            breed_id: BreedId::new(4).unwrap(),
        };
        assert_eq!(err.to_string(), "Invalid breed selection");

        let err = DomainError::CatNotFound {
            id: CatId::new(99).unwrap(),
        };
        assert_eq!(err.to_string(), "Cat not found: 99");

        let err = DomainError::from(StoreError::RowNotFound {
            entity: "cat",
            id: 12,
        });
        assert_eq!(err.to_string(), "Store error: Row not found: cat with id 12");
    }

    #[test]
    fn test_error_classification() {
        let not_found = DomainError::CatNotFound {
            id: CatId::new(1).unwrap(),
        };
        assert!(not_found.is_not_found());
        assert!(!not_found.is_validation_error());

        let invalid = DomainError::InvalidBreedSelection {
            breed_id: BreedId::new(1).unwrap(),
        };
        assert!(invalid.is_validation_error());

        let store = DomainError::Store(StoreError::Backend("disk full".to_string()));
        assert!(!store.is_not_found());
        assert!(!store.is_validation_error());
    }

    #[test]
    fn test_sqlite_errors_are_classified() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             CREATE TABLE parent(id INTEGER PRIMARY KEY);
             CREATE TABLE child(id INTEGER PRIMARY KEY, parent_id INTEGER NOT NULL REFERENCES parent(id));",
        )
        .unwrap();

        let err = conn
            .execute("INSERT INTO child(parent_id) VALUES (42)", [])
            .unwrap_err();
        assert!(matches!(
            StoreError::from(err),
            StoreError::ForeignKeyViolation(_)
        ));

        let err = conn.execute("INSERT INTO missing VALUES (1)", []).unwrap_err();
        assert!(matches!(StoreError::from(err), StoreError::Backend(_)));
    }
}
