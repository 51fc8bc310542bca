//! Status and priority enumerations for repair orders.

use std::{cmp::Ordering, str::FromStr};

use serde::{Deserialize, Serialize};

/// Kanban column an order lives in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Order is waiting to be worked on
    #[default]
    Pending,

    /// Order is being worked on
    InProgress,

    /// Order has been completed
    Completed,
}

impl Status {
    /// All statuses in board column order.
    pub const ALL: [Status; 3] = [Status::Pending, Status::InProgress, Status::Completed];

    /// Convert to the wire/database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
        }
    }

    /// Human readable column label.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }

    /// Position of the column on the board (0-indexed).
    pub fn column_index(&self) -> usize {
        match self {
            Status::Pending => 0,
            Status::InProgress => 1,
            Status::Completed => 2,
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use garage_core::models::Status;
    ///
    /// assert_eq!(Status::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(Status::InProgress.with_icon(), "➤ In Progress");
    /// assert_eq!(Status::Pending.with_icon(), "○ Pending");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            Status::Completed => "✓ Completed",
            Status::InProgress => "➤ In Progress",
            Status::Pending => "○ Pending",
        }
    }
}

impl FromStr for Status {
    type Err = String;

    /// Accepts the wire form (`in-progress`) as well as the column labels
    /// used on the board (`In Progress`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Status::Pending),
            "in-progress" | "in_progress" | "inprogress" | "in progress" => {
                Ok(Status::InProgress)
            }
            "completed" => Ok(Status::Completed),
            _ => Err(format!("Invalid order status: {s}")),
        }
    }
}

/// Urgency of an order. Only used for ordering cards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Convert to the wire/database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Numeric weight; higher sorts first.
    pub fn weight(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    /// Comparator placing higher priorities first.
    pub fn cmp_urgency(a: &Priority, b: &Priority) -> Ordering {
        b.weight().cmp(&a.weight())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!("Invalid priority: {s}")),
        }
    }
}
