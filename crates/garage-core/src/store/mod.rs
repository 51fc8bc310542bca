//! SQLite-backed order storage.
//!
//! [`OrderStore`] is the authoritative [`OrderBackend`]. Each call opens its
//! own connection on a blocking thread so the async board never waits on
//! SQLite directly:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Board / CLI    │    │   OrderStore    │    │    Database     │
//! │ (OrderBackend)  │───▶│ (spawn_blocking)│───▶│   (via db/)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use garage_core::{OrderBackend, OrderStoreBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = OrderStoreBuilder::new()
//!     .with_database_path(Some("/tmp/garage.db"))
//!     .build()
//!     .await?;
//!
//! let orders = store.fetch_all().await?;
//! println!("{} orders on the board", orders.len());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    backend::OrderBackend,
    db::Database,
    error::{JoinResultExt, Result},
    models::{Order, OrderId, Status, UpdateOrderRequest},
    validation::ValidOrder,
};

pub mod builder;

pub use builder::OrderStoreBuilder;

/// Order storage backed by an SQLite file.
#[derive(Debug, Clone)]
pub struct OrderStore {
    pub(crate) db_path: PathBuf,
}

impl OrderStore {
    /// Creates a store over an already initialized database file.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Path of the underlying database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .join_context()
    }
}

impl OrderBackend for OrderStore {
    async fn fetch_all(&self) -> Result<Vec<Order>> {
        self.with_db(|db| db.list_orders()).await
    }

    async fn get_order(&self, id: &OrderId) -> Result<Option<Order>> {
        let id = id.clone();
        self.with_db(move |db| db.get_order(id.as_str())).await
    }

    async fn update_status(&self, id: &OrderId, status: Status) -> Result<Order> {
        let id = id.clone();
        self.with_db(move |db| db.update_status(id.as_str(), status))
            .await
    }

    async fn create_order(&self, order: &ValidOrder) -> Result<Order> {
        let order = order.clone();
        self.with_db(move |db| db.create_order(&order)).await
    }

    async fn update_order(&self, id: &OrderId, request: &UpdateOrderRequest) -> Result<Order> {
        let id = id.clone();
        let request = request.clone();
        self.with_db(move |db| db.update_order(id.as_str(), &request))
            .await
    }
}
