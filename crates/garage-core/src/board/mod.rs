//! Board state and the interactions built on it.
//!
//! ```text
//! ┌─────────────────┐   MoveEvent   ┌─────────────────┐   update_status   ┌─────────────────┐
//! │   DragSurface   │──────────────▶│  Orchestrator   │──────────────────▶│  OrderBackend   │
//! │    (drag)       │               │ (orchestrator)  │                   │                 │
//! └─────────────────┘               └────────┬────────┘                   └─────────────────┘
//!                                            │ apply / revert StatusChange
//!                                            ▼
//!                                   ┌─────────────────┐    derive    ┌─────────────────┐
//!                                   │   SharedBoard   │─────────────▶│    BoardView    │
//!                                   │  (this module)  │              │     (view)      │
//!                                   └─────────────────┘              └─────────────────┘
//! ```
//!
//! The [`Board`] owns the flat order collection. Status changes are applied
//! as [`StatusChange`] commands that remember the previous status, so a
//! failed backend call undoes only its own change.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{
    config::BoardConfig,
    models::{Order, OrderId, Priority, Status},
};

pub mod debounce;
pub mod drag;
pub mod orchestrator;
pub mod view;

pub use debounce::Debouncer;
pub use drag::{DragSurface, DropOutcome, DropTarget, MoveEvent};
pub use orchestrator::{MoveOutcome, Notifier, Orchestrator, RecordingNotifier, SkipReason};
pub use view::{BoardView, Columns};

/// A reversible status change applied to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub order_id: OrderId,
    pub previous: Status,
    pub next: Status,
    /// Record revision produced by applying this change
    revision: u64,
    /// Board version right after the change was applied
    version_after: u64,
    /// Collection order before the priority re-sort, when the re-sort moved
    /// anything
    prior_sequence: Option<Vec<OrderId>>,
}

/// In-memory order collection shown on the board.
#[derive(Debug, Clone, Default)]
pub struct Board {
    orders: Vec<Order>,
    revisions: HashMap<OrderId, u64>,
    /// Last revision handed out; never reset, so revisions stay unique
    /// across reloads
    last_revision: u64,
    version: u64,
    config: BoardConfig,
}

impl Board {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn with_orders(config: BoardConfig, orders: Vec<Order>) -> Self {
        let mut board = Self::new(config);
        board.replace_all(orders);
        board
    }

    /// Replace the whole collection, e.g. after a fetch. Reverts of changes
    /// made before the replacement no longer apply.
    pub fn replace_all(&mut self, orders: Vec<Order>) {
        self.orders = orders;
        self.revisions.clear();
        self.version += 1;
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Counter bumped by every mutation; unchanged means untouched.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of orders per column, in board column order.
    pub fn counts(&self) -> [usize; 3] {
        let mut counts = [0; 3];
        for order in &self.orders {
            counts[order.status.column_index()] += 1;
        }
        counts
    }

    /// Put a freshly created order at the top of the board.
    pub fn prepend(&mut self, order: Order) {
        self.orders.insert(0, order);
        self.version += 1;
    }

    /// Swap in a newer copy of an order, keeping its position. Pending
    /// reverts of that order are dropped.
    pub fn replace_order(&mut self, order: Order) -> bool {
        let Some(slot) = self.orders.iter_mut().find(|o| o.id == order.id) else {
            return false;
        };
        let id = order.id.clone();
        *slot = order;
        self.bump_revision(&id);
        self.version += 1;
        true
    }

    /// Apply a status change. Returns `None` without touching the board when
    /// the order is unknown or already has `next` status.
    pub fn apply_status(&mut self, id: &OrderId, next: Status) -> Option<StatusChange> {
        let order = self.orders.iter_mut().find(|o| &o.id == id)?;
        if order.status == next {
            return None;
        }
        let previous = order.status;
        order.status = next;

        let revision = self.bump_revision(id);

        let prior_sequence = if self.config.resort_on_status_change {
            self.resort_by_priority()
        } else {
            None
        };

        self.version += 1;
        Some(StatusChange {
            order_id: id.clone(),
            previous,
            next,
            revision,
            version_after: self.version,
            prior_sequence,
        })
    }

    /// Undo a change made by [`Board::apply_status`].
    ///
    /// Only the changed record is restored, and only if no later change of
    /// the same record was applied since. The collection order is restored
    /// too when nothing else touched the board in between. Returns whether
    /// anything was reverted.
    pub fn revert(&mut self, change: &StatusChange) -> bool {
        if self.revisions.get(&change.order_id) != Some(&change.revision) {
            return false;
        }
        let Some(order) = self.orders.iter_mut().find(|o| o.id == change.order_id) else {
            return false;
        };
        order.status = change.previous;

        if self.version == change.version_after {
            if let Some(sequence) = &change.prior_sequence {
                self.restore_sequence(sequence);
            }
        }
        self.version += 1;
        true
    }

    fn bump_revision(&mut self, id: &OrderId) -> u64 {
        self.last_revision += 1;
        self.revisions.insert(id.clone(), self.last_revision);
        self.last_revision
    }

    /// Stable sort, high priority first. Returns the previous id sequence if
    /// the order changed.
    fn resort_by_priority(&mut self) -> Option<Vec<OrderId>> {
        let before: Vec<OrderId> = self.orders.iter().map(|o| o.id.clone()).collect();
        self.orders
            .sort_by(|a, b| Priority::cmp_urgency(&a.priority, &b.priority));
        let changed = self
            .orders
            .iter()
            .zip(&before)
            .any(|(order, id)| &order.id != id);
        changed.then_some(before)
    }

    fn restore_sequence(&mut self, sequence: &[OrderId]) {
        let position: HashMap<&OrderId, usize> =
            sequence.iter().enumerate().map(|(i, id)| (id, i)).collect();
        self.orders
            .sort_by_key(|o| position.get(&o.id).copied().unwrap_or(usize::MAX));
    }
}

/// Board shared between the orchestrator, the session and any views.
///
/// The lock is only held for synchronous edits, never across an await.
#[derive(Debug, Clone, Default)]
pub struct SharedBoard(Arc<Mutex<Board>>);

impl SharedBoard {
    pub fn new(board: Board) -> Self {
        Self(Arc::new(Mutex::new(board)))
    }

    /// Run `f` with exclusive access to the board.
    pub fn with<R>(&self, f: impl FnOnce(&mut Board) -> R) -> R {
        f(&mut self.lock())
    }

    /// Copy of the current collection.
    pub fn snapshot(&self) -> Vec<Order> {
        self.lock().orders.clone()
    }

    pub fn version(&self) -> u64 {
        self.lock().version
    }

    pub fn status_of(&self, id: &OrderId) -> Option<Status> {
        self.lock().get(id).map(|o| o.status)
    }

    fn lock(&self) -> MutexGuard<'_, Board> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
