//! Wrappers for displaying groups of orders.

use std::fmt;

use crate::{board::Columns, models::Order};

/// Newtype wrapper for displaying a list of orders in full.
///
/// ```rust
/// use garage_core::display::Orders;
///
/// assert_eq!(format!("{}", Orders(vec![])), "No orders found.\n");
/// ```
pub struct Orders(pub Vec<Order>);

impl Orders {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Order> {
        self.0.iter()
    }
}

impl IntoIterator for Orders {
    type Item = Order;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Orders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No orders found.")
        } else {
            for order in &self.0 {
                write!(f, "{order}")?;
            }
            Ok(())
        }
    }
}

/// Compact one-line card for an order inside a board column.
struct Card<'a>(&'a Order);

impl fmt::Display for Card<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = self.0;
        write!(
            f,
            "- **{}** {} · {} · {} {} · {}",
            order.id,
            order.title,
            order.customer.name,
            order.vehicle.year,
            order.vehicle.make_model(),
            order.priority
        )?;
        if let Some(due) = &order.due_date {
            write!(f, " · due {due}")?;
        }
        if let Some(assignee) = &order.assigned_to {
            write!(f, " · {}", assignee.initials())?;
        }
        writeln!(f)
    }
}

/// Displays derived columns as a markdown board: one section per status
/// with its count and compact cards.
pub struct BoardColumns<'a>(pub &'a Columns);

impl fmt::Display for BoardColumns<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No orders found.");
        }
        for (status, orders) in self.0.iter() {
            writeln!(f, "## {} ({})", status.label(), orders.len())?;
            writeln!(f)?;
            if orders.is_empty() {
                writeln!(f, "_Empty_")?;
            }
            for order in orders {
                write!(f, "{}", Card(order))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::{
        board::BoardView,
        models::{Assignee, BoardQuery, Customer, OrderId, Priority, Status, Vehicle},
    };

    fn order() -> Order {
        Order {
            id: OrderId::new("order-1"),
            title: "Oil Change".to_string(),
            description: None,
            priority: Priority::Medium,
            status: Status::Pending,
            customer: Customer {
                name: "John Smith".to_string(),
            },
            vehicle: Vehicle {
                make: "Toyota".to_string(),
                model: "Camry".to_string(),
                year: 2019,
            },
            due_date: Some(date(2023, 5, 10)),
            assigned_to: Some(Assignee::named("Mike Johnson")),
            created_at: None,
        }
    }

    #[test]
    fn test_board_lists_every_column() {
        let columns = BoardView::derive(&[order()], &BoardQuery::default(), date(2023, 5, 10));
        let output = format!("{}", BoardColumns(&columns));
        assert!(output.contains("## Pending (1)"));
        assert!(output.contains("## In Progress (0)"));
        assert!(output.contains("## Completed (0)"));
        assert!(output.contains(
            "- **order-1** Oil Change · John Smith · 2019 Toyota Camry · medium · due 2023-05-10 · MJ"
        ));
    }

    #[test]
    fn test_empty_board() {
        let columns = Columns::default();
        assert_eq!(format!("{}", BoardColumns(&columns)), "No orders found.\n");
    }
}
