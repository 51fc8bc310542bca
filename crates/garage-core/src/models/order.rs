//! Order model definition and related functionality.

use std::fmt;

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{Assignee, Priority, Status};

/// Opaque, backend-assigned order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Customer the vehicle belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
}

/// Vehicle being repaired.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vehicle {
    pub make: String,
    pub model: String,
    /// Model year, within 1886..=2100
    pub year: u16,
}

impl Vehicle {
    /// `"<make> <model>"`, the form searched on the board.
    pub fn make_model(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}

/// A repair order: the card moved across the board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique identifier, stable across updates
    pub id: OrderId,

    /// Short title of the job
    pub title: String,

    /// Free-form details of the job
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Urgency, used for ordering cards
    pub priority: Priority,

    /// Column the order lives in
    pub status: Status,

    pub customer: Customer,

    pub vehicle: Vehicle,

    /// Day the job is due
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Date>,

    /// Worker responsible for the job
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Assignee>,

    /// Timestamp assigned by the backend on creation (UTC)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl Order {
    /// Case-insensitive search over title, description, customer name and
    /// `"make model"`. The needle must already be lowercased.
    pub(crate) fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
            || self.customer.name.to_lowercase().contains(needle)
            || self.vehicle.make_model().to_lowercase().contains(needle)
    }
}
