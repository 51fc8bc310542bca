//! Core library for the Garage repair order board.
//!
//! Repair orders move across three columns (Pending, In Progress,
//! Completed). The crate provides the order models and form validation, the
//! SQLite store behind the [`OrderBackend`] trait, and the board itself:
//! column derivation, drag and drop, and optimistic status updates that are
//! rolled back when the backend rejects them.
//!
//! # Display Architecture
//!
//! - **Domain Models** ([`models`]): implement [`std::fmt::Display`] for
//!   direct formatting
//! - **Display Wrappers** ([`display`]): board columns, order lists and
//!   operation results
//! - **Terminal Rendering**: markdown output via the CLI's terminal renderer
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use garage_core::{
//!     board::RecordingNotifier, demo, BoardSession, GarageConfig, MemoryBackend, Status,
//!     SystemClock,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = Arc::new(MemoryBackend::new());
//! demo::seed_demo_orders(backend.as_ref()).await?;
//!
//! let mut session = BoardSession::new(
//!     backend,
//!     Arc::new(RecordingNotifier::new()),
//!     GarageConfig::default(),
//!     Arc::new(SystemClock),
//! );
//! session.load().await?;
//!
//! let outcome = session.move_order(&"order-1".into(), Status::InProgress).await;
//! assert!(outcome.is_confirmed());
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod board;
pub mod cache;
pub mod clock;
pub mod config;
pub mod db;
pub mod demo;
pub mod display;
pub mod error;
pub mod models;
pub mod session;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use backend::{MemoryBackend, OrderBackend};
pub use board::{
    BoardView, Columns, DragSurface, DropOutcome, DropTarget, MoveEvent, MoveOutcome, Notifier,
    Orchestrator, SharedBoard,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{BoardConfig, GarageConfig};
pub use db::Database;
pub use display::{BoardColumns, CreateResult, OperationStatus, Orders, UpdateResult};
pub use error::{GarageError, Result};
pub use models::{
    Assignee, BoardQuery, CategoryFilter, Customer, Order, OrderId, Priority, Status,
    UpdateOrderRequest, Vehicle,
};
pub use session::{BoardSession, DropResult};
pub use store::{OrderStore, OrderStoreBuilder};
pub use validation::{NewOrderForm, ValidOrder, ValidationErrors};
