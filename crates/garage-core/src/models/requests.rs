//! Request types for updating orders.

use jiff::civil::Date;

use super::{Assignee, Order, Priority};
use crate::validation::{self, FieldError, ValidationErrors};

/// Detail edits for an existing order. `None` leaves a field untouched.
///
/// Status is not editable here; columns change through status moves only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateOrderRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<Date>,
    pub assigned_to: Option<Assignee>,
}

impl UpdateOrderRequest {
    /// Whether the request changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check edited fields against the same rules as the new-order form.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        if let Some(title) = &self.title {
            if let Some(message) = validation::title_error(title) {
                errors.push(FieldError::new("title", message));
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors::from(errors))
        }
    }

    /// Apply the edits to an order, returning the names of changed fields.
    pub fn apply_to(&self, order: &mut Order) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(title) = &self.title {
            if *title != order.title {
                order.title = title.clone();
                changes.push("title".to_string());
            }
        }
        if let Some(description) = &self.description {
            if order.description.as_ref() != Some(description) {
                order.description = Some(description.clone());
                changes.push("description".to_string());
            }
        }
        if let Some(priority) = self.priority {
            if order.priority != priority {
                order.priority = priority;
                changes.push("priority".to_string());
            }
        }
        if let Some(due_date) = self.due_date {
            if order.due_date != Some(due_date) {
                order.due_date = Some(due_date);
                changes.push("due date".to_string());
            }
        }
        if let Some(assignee) = &self.assigned_to {
            if order.assigned_to.as_ref() != Some(assignee) {
                order.assigned_to = Some(assignee.clone());
                changes.push("assignee".to_string());
            }
        }
        changes
    }
}
