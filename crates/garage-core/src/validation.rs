//! New-order form validation.
//!
//! The form carries raw user input (the vehicle year is still text). A
//! successful [`NewOrderForm::validate`] produces a [`ValidOrder`], the only
//! value the backends accept for creation, so an invalid form can never reach
//! a create call.
//!
//! Each field reports its first failing rule:
//!
//! ```rust
//! use garage_core::validation::NewOrderForm;
//!
//! let form = NewOrderForm {
//!     title: "Oi".to_string(),
//!     customer_name: "John Smith".to_string(),
//!     make: "Toyota".to_string(),
//!     model: "Camry".to_string(),
//!     year: "1700".to_string(),
//!     ..Default::default()
//! };
//! let errors = form.validate().unwrap_err();
//! assert_eq!(errors.message_for("title"), Some("Title must be at least 3 characters"));
//! assert_eq!(errors.message_for("vehicle.year"), Some("Year must be between 1886 and 2100"));
//! ```

use std::fmt;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::models::{Assignee, Customer, Priority, Vehicle};

const TITLE_MIN: usize = 3;
const TITLE_MAX: usize = 50;
const CUSTOMER_NAME_MIN: usize = 2;
const YEAR_MIN: u16 = 1886;
const YEAR_MAX: u16 = 2100;

/// A single failed form rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted path of the field, e.g. `vehicle.year`
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// All rule failures of one form submission, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Message reported for a field, if it failed.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Raw input of the new-order form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewOrderForm {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub customer_name: String,
    pub make: String,
    pub model: String,
    /// Four-digit year as typed
    pub year: String,
    pub due_date: Option<Date>,
    /// Free-form assignee name
    pub assigned_to: Option<String>,
}

/// A new order that passed validation, ready for the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidOrder {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub customer: Customer,
    pub vehicle: Vehicle,
    pub due_date: Option<Date>,
    pub assigned_to: Option<Assignee>,
}

impl NewOrderForm {
    /// Validate every field and build the order to create.
    pub fn validate(&self) -> Result<ValidOrder, ValidationErrors> {
        let mut errors = Vec::new();

        if let Some(message) = title_error(&self.title) {
            errors.push(FieldError::new("title", message));
        }
        if let Some(message) = customer_name_error(&self.customer_name) {
            errors.push(FieldError::new("customer.name", message));
        }
        if self.make.is_empty() {
            errors.push(FieldError::new("vehicle.make", "Make is required"));
        }
        if self.model.is_empty() {
            errors.push(FieldError::new("vehicle.model", "Model is required"));
        }
        let year = match parse_year(&self.year) {
            Ok(year) => Some(year),
            Err(message) => {
                errors.push(FieldError::new("vehicle.year", message));
                None
            }
        };

        match year {
            Some(year) if errors.is_empty() => Ok(ValidOrder {
                title: self.title.clone(),
                description: self.description.clone().filter(|d| !d.is_empty()),
                priority: self.priority,
                customer: Customer {
                    name: self.customer_name.clone(),
                },
                vehicle: Vehicle {
                    make: self.make.clone(),
                    model: self.model.clone(),
                    year,
                },
                due_date: self.due_date,
                assigned_to: self
                    .assigned_to
                    .as_deref()
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(Assignee::named),
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }
}

pub(crate) fn title_error(title: &str) -> Option<&'static str> {
    let len = title.chars().count();
    if len == 0 {
        Some("Title is required")
    } else if len < TITLE_MIN {
        Some("Title must be at least 3 characters")
    } else if len > TITLE_MAX {
        Some("Title must be at most 50 characters")
    } else {
        None
    }
}

fn customer_name_error(name: &str) -> Option<&'static str> {
    let len = name.chars().count();
    if len == 0 {
        Some("Customer name is required")
    } else if len < CUSTOMER_NAME_MIN {
        Some("Customer name must be at least 2 characters")
    } else {
        None
    }
}

fn parse_year(year: &str) -> Result<u16, &'static str> {
    if year.is_empty() {
        return Err("Year is required");
    }
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err("Year must be valid");
    }
    let value: u16 = year.parse().map_err(|_| "Year must be valid")?;
    if !(YEAR_MIN..=YEAR_MAX).contains(&value) {
        return Err("Year must be between 1886 and 2100");
    }
    Ok(value)
}
