//! Display formatting for orders, boards and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly; collections and
//! operation outcomes are formatted through newtype wrappers. Everything
//! renders as markdown so the CLI can hand it to the terminal renderer.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │    Markdown     │
//! │ (Order, Status) │───▶│ (Orders, Board) │───▶│     Output      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: order lists and the three-column board
//! - [`results`]: create and update outcomes
//! - [`status`]: success and error notifications
//! - [`datetime`]: timestamp formatting
//! - [`models`]: Display implementations for domain models
//!
//! ```rust
//! use garage_core::display::OperationStatus;
//!
//! let toast = OperationStatus::success("Order status updated to Completed");
//! assert_eq!(format!("{toast}"), "Success: Order status updated to Completed\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{BoardColumns, Orders};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, UpdateResult};
pub use status::OperationStatus;
