//! Drag and drop between board columns.
//!
//! The surface keeps its own copy of each column's card order, so drop
//! positions are computed from explicit indexes rather than from whatever
//! happens to be rendered. Only a drop onto a different column produces a
//! [`MoveEvent`]; reordering inside a column stays local.

use log::debug;

use super::view::Columns;
use crate::models::{OrderId, Status};

/// Request to move an order into another column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveEvent {
    pub order_id: OrderId,
    pub target: Status,
}

/// Where a card is dropped: a column, optionally in front of another card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    pub status: Status,
    pub before: Option<OrderId>,
}

impl DropTarget {
    /// Drop at the end of a column.
    pub fn column(status: Status) -> Self {
        Self {
            status,
            before: None,
        }
    }

    /// Drop in front of `card`.
    pub fn before(status: Status, card: impl Into<OrderId>) -> Self {
        Self {
            status,
            before: Some(card.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The card changed column; the event goes to the orchestrator
    Move(MoveEvent),
    /// The card changed position inside its column
    Reordered,
    /// Nothing changed
    NoOp,
}

#[derive(Debug, Clone, Default)]
pub struct DragSurface {
    columns: [Vec<OrderId>; 3],
    active: Option<OrderId>,
}

impl DragSurface {
    pub fn from_columns(columns: &Columns) -> Self {
        let mut surface = Self::default();
        for (status, orders) in columns.iter() {
            surface.columns[status.column_index()] =
                orders.iter().map(|o| o.id.clone()).collect();
        }
        surface
    }

    /// Bring the surface in line with freshly derived columns.
    ///
    /// Cards that stay in their column keep their local position. Cards new
    /// to a column are appended in view order, and cards no longer shown are
    /// removed.
    pub fn sync(&mut self, columns: &Columns) {
        for (status, orders) in columns.iter() {
            let column = &mut self.columns[status.column_index()];
            column.retain(|id| orders.iter().any(|o| &o.id == id));
            for order in orders {
                if !column.contains(&order.id) {
                    column.push(order.id.clone());
                }
            }
        }
        if let Some(active) = &self.active {
            if self.status_of(active).is_none() {
                self.active = None;
            }
        }
    }

    /// Order each of `columns` the way the surface has it.
    pub fn arrange(&self, mut columns: Columns) -> Columns {
        for status in Status::ALL {
            let order = self.column(status);
            columns.sort_column_by_key(status, |o| {
                order.iter().position(|id| id == &o.id).unwrap_or(usize::MAX)
            });
        }
        columns
    }

    /// Card order of one column.
    pub fn column(&self, status: Status) -> &[OrderId] {
        &self.columns[status.column_index()]
    }

    /// Column a card currently sits in.
    pub fn status_of(&self, id: &OrderId) -> Option<Status> {
        Status::ALL
            .into_iter()
            .find(|status| self.column(*status).contains(id))
    }

    /// Card being dragged, if any.
    pub fn active(&self) -> Option<&OrderId> {
        self.active.as_ref()
    }

    /// Pick up a card. Returns false when the card is not on the surface.
    pub fn begin(&mut self, id: &OrderId) -> bool {
        if self.status_of(id).is_none() {
            return false;
        }
        self.active = Some(id.clone());
        true
    }

    /// Abandon the current drag.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Index a card dropped in front of `before` would land at; the end of
    /// the column when `before` is absent or not in that column.
    pub fn insertion_index(&self, status: Status, before: Option<&OrderId>) -> usize {
        let column = self.column(status);
        before
            .and_then(|id| column.iter().position(|c| c == id))
            .unwrap_or(column.len())
    }

    /// Drop the active card on `target`.
    pub fn drop_on(&mut self, target: DropTarget) -> DropOutcome {
        let Some(id) = self.active.take() else {
            return DropOutcome::NoOp;
        };
        let Some(current) = self.status_of(&id) else {
            return DropOutcome::NoOp;
        };
        if target.before.as_ref() == Some(&id) {
            return DropOutcome::NoOp;
        }

        let from = self.insertion_index(current, Some(&id));
        self.columns[current.column_index()].remove(from);
        let to = self.insertion_index(target.status, target.before.as_ref());
        self.columns[target.status.column_index()].insert(to, id.clone());

        if target.status != current {
            debug!("Dropped {id} on {}", target.status.as_str());
            DropOutcome::Move(MoveEvent {
                order_id: id,
                target: target.status,
            })
        } else if to == from {
            DropOutcome::NoOp
        } else {
            DropOutcome::Reordered
        }
    }
}
