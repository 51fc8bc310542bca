//! Builder for creating and configuring OrderStore instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::OrderStore;
use crate::{
    db::Database,
    error::{GarageError, JoinResultExt, Result},
};

/// Builder for creating and configuring OrderStore instances.
#[derive(Debug, Clone, Default)]
pub struct OrderStoreBuilder {
    database_path: Option<PathBuf>,
}

impl OrderStoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/garage/garage.db` or `~/.local/share/garage/garage.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured store, creating the database file and schema.
    ///
    /// # Errors
    ///
    /// Returns `GarageError::FileSystem` if the database directory cannot be
    /// created, `GarageError::Database` if schema initialization fails
    pub async fn build(self) -> Result<OrderStore> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GarageError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || Database::new(&db_path_clone).map(|_| ()))
            .await
            .join_context()?;

        Ok(OrderStore::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("garage")
            .place_data_file("garage.db")
            .map_err(|e| GarageError::XdgDirectory(e.to_string()))
    }
}
