//! Data models for repair orders.
//!
//! This module contains the core domain models of the board: the [`Order`]
//! record with its customer and vehicle, the [`Status`] column keys, the
//! [`Priority`] used for ordering, and the [`Assignee`] union. Display
//! implementations live in [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use garage_core::models::{Customer, Order, OrderId, Priority, Status, Vehicle};
//!
//! let order = Order {
//!     id: OrderId::new("order-1"),
//!     title: "Oil Change".to_string(),
//!     description: None,
//!     priority: Priority::Medium,
//!     status: Status::Pending,
//!     customer: Customer { name: "John Smith".to_string() },
//!     vehicle: Vehicle { make: "Toyota".to_string(), model: "Camry".to_string(), year: 2019 },
//!     due_date: None,
//!     assigned_to: None,
//!     created_at: None,
//! };
//! assert_eq!(order.vehicle.make_model(), "Toyota Camry");
//! println!("{}", order); // Shows ○ Pending status icon
//! ```

pub mod assignee;
pub mod filters;
pub mod order;
pub mod requests;
pub mod status;


pub use assignee::Assignee;
pub use filters::{BoardQuery, CategoryFilter, DEFAULT_USER};
pub use order::{Customer, Order, OrderId, Vehicle};
pub use requests::UpdateOrderRequest;
pub use status::{Priority, Status};
