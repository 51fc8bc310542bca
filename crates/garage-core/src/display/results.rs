//! Result wrappers for create and update operations.

use std::fmt;

use crate::models::Order;

/// Displays a freshly created resource with a confirmation line.
#[derive(Debug)]
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Order> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created order with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Displays an updated resource and, when known, the fields that changed.
///
/// ```rust
/// use garage_core::{
///     display::UpdateResult,
///     models::{Customer, Order, OrderId, Priority, Status, Vehicle},
/// };
///
/// let order = Order {
///     id: OrderId::new("order-3"),
///     title: "Tire Rotation".to_string(),
///     description: None,
///     priority: Priority::Low,
///     status: Status::Pending,
///     customer: Customer { name: "Robert Johnson".to_string() },
///     vehicle: Vehicle { make: "Ford".to_string(), model: "F-150".to_string(), year: 2021 },
///     due_date: None,
///     assigned_to: None,
///     created_at: None,
/// };
///
/// let result = UpdateResult::with_changes(order, vec!["priority".to_string()]);
/// assert!(format!("{result}").contains("- priority"));
/// ```
#[derive(Debug)]
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<Order> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated order with ID: {}", self.resource.id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}
