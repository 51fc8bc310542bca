//! Optimistic status updates.
//!
//! A move is applied to the board before the backend is asked to confirm
//! it, so the card changes column immediately. If the backend call fails the
//! move's own [`StatusChange`] is reverted; moves of other cards made in the
//! meantime are left alone, and a revert is skipped when the same card has
//! been moved again since.

use std::sync::{Arc, Mutex};

use log::{debug, info, warn};

use super::{Board, MoveEvent, SharedBoard, StatusChange};
use crate::{
    backend::OrderBackend,
    display::OperationStatus,
    error::GarageError,
    models::{Order, OrderId, Status},
};

/// Receives user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, status: OperationStatus);
}

/// Notifier that keeps every notification, for tests and batch output.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    statuses: Mutex<Vec<OperationStatus>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far.
    pub fn notifications(&self) -> Vec<OperationStatus> {
        self.lock().clone()
    }

    /// Remove and return the notifications received so far.
    pub fn take(&self) -> Vec<OperationStatus> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<OperationStatus>> {
        self.statuses.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, status: OperationStatus) {
        self.lock().push(status);
    }
}

/// Why a move was not attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The order is not on the board
    UnknownOrder,
    /// The order already has the requested status
    AlreadyInStatus,
}

/// Result of [`Orchestrator::move_order`].
#[derive(Debug)]
pub enum MoveOutcome {
    /// Nothing was done: no backend call, no board change
    Skipped(SkipReason),
    /// The backend accepted the move
    Confirmed(Order),
    /// The backend rejected the move and it was rolled back
    Reverted(GarageError),
}

impl MoveOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, MoveOutcome::Confirmed(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, MoveOutcome::Skipped(_))
    }

    pub fn is_reverted(&self) -> bool {
        matches!(self, MoveOutcome::Reverted(_))
    }
}

/// Runs status moves against a board and a backend.
pub struct Orchestrator<B, N> {
    backend: Arc<B>,
    board: SharedBoard,
    notifier: Arc<N>,
}

impl<B, N> Clone for Orchestrator<B, N> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            board: self.board.clone(),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<B: OrderBackend, N: Notifier> Orchestrator<B, N> {
    pub fn new(backend: Arc<B>, board: SharedBoard, notifier: Arc<N>) -> Self {
        Self {
            backend,
            board,
            notifier,
        }
    }

    pub fn board(&self) -> &SharedBoard {
        &self.board
    }

    /// Move an order to `status`.
    ///
    /// The board is updated before the backend call is awaited. On failure
    /// only this move is reverted and an error notification is emitted; on
    /// success a confirmation is emitted and the optimistic state is kept.
    pub async fn move_order(&self, id: &OrderId, status: Status) -> MoveOutcome {
        let change = match self.board.with(|board| Self::begin_move(board, id, status)) {
            Ok(change) => change,
            Err(reason) => {
                debug!("Skipping move of {id} to {}: {reason:?}", status.as_str());
                return MoveOutcome::Skipped(reason);
            }
        };

        match self.backend.update_status(id, status).await {
            Ok(order) => {
                info!("Moved {id} to {}", status.as_str());
                self.notifier.notify(OperationStatus::success(format!(
                    "Order status updated to {}",
                    status.label()
                )));
                MoveOutcome::Confirmed(order)
            }
            Err(e) => {
                warn!("Failed to move {id} to {}: {e}", status.as_str());
                self.rollback(&change);
                self.notifier
                    .notify(OperationStatus::failure("Failed to update order status"));
                MoveOutcome::Reverted(e)
            }
        }
    }

    /// Forward a drop from the drag surface.
    pub async fn handle(&self, event: MoveEvent) -> MoveOutcome {
        self.move_order(&event.order_id, event.target).await
    }

    fn begin_move(
        board: &mut Board,
        id: &OrderId,
        status: Status,
    ) -> Result<StatusChange, SkipReason> {
        if board.get(id).is_none() {
            return Err(SkipReason::UnknownOrder);
        }
        board
            .apply_status(id, status)
            .ok_or(SkipReason::AlreadyInStatus)
    }

    fn rollback(&self, change: &StatusChange) {
        if self.board.with(|board| board.revert(change)) {
            debug!(
                "Reverted {} to {}",
                change.order_id,
                change.previous.as_str()
            );
        } else {
            debug!(
                "Not reverting {}: it changed again since the failed move",
                change.order_id
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        backend::MemoryBackend,
        config::BoardConfig,
        models::{Customer, Priority, Vehicle},
    };

    fn order(id: &str, status: Status, priority: Priority) -> Order {
        Order {
            id: OrderId::new(id),
            title: format!("Job {id}"),
            description: None,
            priority,
            status,
            customer: Customer {
                name: "Jennifer Lee".to_string(),
            },
            vehicle: Vehicle {
                make: "BMW".to_string(),
                model: "X5".to_string(),
                year: 2018,
            },
            due_date: None,
            assigned_to: None,
            created_at: None,
        }
    }

    struct Fixture {
        backend: Arc<MemoryBackend>,
        notifier: Arc<RecordingNotifier>,
        orchestrator: Orchestrator<MemoryBackend, RecordingNotifier>,
    }

    fn fixture(orders: Vec<Order>) -> Fixture {
        let backend = Arc::new(MemoryBackend::with_orders(orders.clone()));
        let notifier = Arc::new(RecordingNotifier::new());
        let board = SharedBoard::new(Board::with_orders(BoardConfig::default(), orders));
        let orchestrator = Orchestrator::new(backend.clone(), board, notifier.clone());
        Fixture {
            backend,
            notifier,
            orchestrator,
        }
    }

    fn three_orders() -> Vec<Order> {
        vec![
            order("order-1", Status::Pending, Priority::Medium),
            order("order-2", Status::Pending, Priority::High),
            order("order-3", Status::InProgress, Priority::Low),
        ]
    }

    #[tokio::test]
    async fn test_move_confirmed_updates_board_and_backend() {
        let f = fixture(three_orders());
        let id = OrderId::new("order-1");

        let outcome = f.orchestrator.move_order(&id, Status::InProgress).await;
        assert!(outcome.is_confirmed());
        assert_eq!(f.orchestrator.board().status_of(&id), Some(Status::InProgress));
        assert_eq!(f.backend.status_of("order-1"), Some(Status::InProgress));
        assert_eq!(
            f.notifier.notifications(),
            vec![OperationStatus::success("Order status updated to In Progress")]
        );
    }

    #[tokio::test]
    async fn test_self_move_and_unknown_id_are_noops() {
        let f = fixture(three_orders());
        let version = f.orchestrator.board().version();

        let same = f
            .orchestrator
            .move_order(&OrderId::new("order-3"), Status::InProgress)
            .await;
        assert!(matches!(same, MoveOutcome::Skipped(SkipReason::AlreadyInStatus)));

        let unknown = f
            .orchestrator
            .move_order(&OrderId::new("order-99"), Status::Completed)
            .await;
        assert!(matches!(unknown, MoveOutcome::Skipped(SkipReason::UnknownOrder)));

        assert_eq!(f.backend.update_calls(), 0);
        assert_eq!(f.orchestrator.board().version(), version);
        assert!(f.notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_failed_move_restores_board() {
        let f = fixture(three_orders());
        let before = f.orchestrator.board().snapshot();
        f.backend.fail_updates(true);

        let outcome = f
            .orchestrator
            .move_order(&OrderId::new("order-1"), Status::Completed)
            .await;
        assert!(outcome.is_reverted());
        assert_eq!(f.orchestrator.board().snapshot(), before);
        assert_eq!(f.backend.status_of("order-1"), Some(Status::Pending));
        assert_eq!(
            f.notifier.notifications(),
            vec![OperationStatus::failure("Failed to update order status")]
        );
    }

    #[tokio::test]
    async fn test_three_order_scenario_counts() {
        let f = fixture(three_orders());
        f.orchestrator
            .move_order(&OrderId::new("order-1"), Status::Completed)
            .await;
        let counts = f.orchestrator.board().with(|board| board.counts());
        assert_eq!(counts, [1, 1, 1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_failure_keeps_other_move() {
        let f = fixture(three_orders());
        f.backend.fail_update_of("order-1");
        f.backend.delay_update_of("order-1", Duration::from_millis(100));

        let failing = OrderId::new("order-1");
        let other = OrderId::new("order-2");
        let (first, second) = tokio::join!(
            f.orchestrator.move_order(&failing, Status::Completed),
            f.orchestrator.move_order(&other, Status::InProgress),
        );
        assert!(first.is_reverted());
        assert!(second.is_confirmed());

        let board = f.orchestrator.board();
        assert_eq!(board.status_of(&failing), Some(Status::Pending));
        assert_eq!(board.status_of(&other), Some(Status::InProgress));
        assert_eq!(f.notifier.notifications().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_revert_is_skipped() {
        let f = fixture(three_orders());
        let id = OrderId::new("order-1");
        f.backend.fail_update_of("order-1");
        f.backend.delay_update_of("order-1", Duration::from_millis(100));

        let board = f.orchestrator.board().clone();
        let (outcome, _) = tokio::join!(
            f.orchestrator.move_order(&id, Status::InProgress),
            async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                board.with(|b| b.apply_status(&OrderId::new("order-1"), Status::Completed));
            }
        );
        assert!(outcome.is_reverted());
        assert_eq!(board.status_of(&id), Some(Status::Completed));
    }

    #[tokio::test]
    async fn test_handle_forwards_drop_event() {
        let f = fixture(three_orders());
        let outcome = f
            .orchestrator
            .handle(MoveEvent {
                order_id: OrderId::new("order-3"),
                target: Status::Completed,
            })
            .await;
        assert!(outcome.is_confirmed());
        assert_eq!(f.backend.update_calls(), 1);
    }
}
