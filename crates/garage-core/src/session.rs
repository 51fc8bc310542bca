//! Interactive board session.
//!
//! A [`BoardSession`] is the state a board front end drives: it loads the
//! orders through the query cache, keeps the debounced search term and the
//! active category filter, derives the visible columns, and routes moves,
//! creations and detail edits to the backend.
//!
//! ```text
//! Front end → BoardSession → Orchestrator / OrderBackend
//!                  │
//!                  └─ QueryCache, SharedBoard, Debouncer
//! ```

use std::sync::Arc;

use jiff::civil::Date;
use log::{info, warn};

use crate::{
    backend::OrderBackend,
    board::{
        Board, BoardView, Columns, Debouncer, DragSurface, DropOutcome, DropTarget, MoveEvent,
        MoveOutcome, Notifier, Orchestrator, SharedBoard,
    },
    cache::{QueryCache, ResourceKey},
    clock::Clock,
    config::GarageConfig,
    display::{OperationStatus, UpdateResult},
    error::{GarageError, Result},
    models::{BoardQuery, CategoryFilter, Order, OrderId, Status, UpdateOrderRequest},
    validation::NewOrderForm,
};

/// Result of [`BoardSession::drop_order`].
#[derive(Debug)]
pub enum DropResult {
    /// The card is not among the visible cards
    NotVisible,
    /// The card ended up where it was
    NoOp,
    /// The card moved inside its column; kept until the next load
    Reordered,
    /// The card was dropped on another column
    Moved(MoveOutcome),
}

pub struct BoardSession<B, N> {
    backend: Arc<B>,
    notifier: Arc<N>,
    orchestrator: Orchestrator<B, N>,
    cache: QueryCache<Vec<Order>>,
    search: Debouncer<String>,
    filter: CategoryFilter,
    drag: DragSurface,
    config: GarageConfig,
    clock: Arc<dyn Clock>,
}

impl<B: OrderBackend, N: Notifier> BoardSession<B, N> {
    pub fn new(
        backend: Arc<B>,
        notifier: Arc<N>,
        config: GarageConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let board = SharedBoard::new(Board::new(config.board));
        let orchestrator = Orchestrator::new(Arc::clone(&backend), board, Arc::clone(&notifier));
        Self {
            backend,
            notifier,
            orchestrator,
            cache: QueryCache::new(config.cache_ttl(), Arc::clone(&clock)),
            search: Debouncer::new(String::new(), config.search_debounce()),
            filter: CategoryFilter::All,
            drag: DragSurface::default(),
            config,
            clock,
        }
    }

    pub fn board(&self) -> &SharedBoard {
        self.orchestrator.board()
    }

    pub fn orchestrator(&self) -> &Orchestrator<B, N> {
        &self.orchestrator
    }

    pub fn config(&self) -> &GarageConfig {
        &self.config
    }

    /// Today's date as seen by the session clock.
    pub fn today(&self) -> Date {
        self.clock.today()
    }

    /// Load the orders onto the board, from the cache when it is fresh.
    /// Returns the number of orders loaded.
    ///
    /// # Errors
    ///
    /// Returns the backend error when the fetch fails. The board is left
    /// empty in that case.
    pub async fn load(&mut self) -> Result<usize> {
        let orders = match self.cache.get(&ResourceKey::ORDERS) {
            Some(orders) => orders,
            None => match self.backend.fetch_all().await {
                Ok(orders) => {
                    self.cache.insert(ResourceKey::ORDERS, orders.clone());
                    orders
                }
                Err(e) => {
                    warn!("Failed to fetch orders: {e}");
                    self.board().with(|board| board.replace_all(Vec::new()));
                    self.notifier
                        .notify(OperationStatus::failure("Failed to fetch orders"));
                    return Err(e);
                }
            },
        };

        let count = orders.len();
        self.board().with(|board| board.replace_all(orders));
        self.drag = DragSurface::default();
        Ok(count)
    }

    /// Drop the cached orders and load again.
    pub async fn refresh(&mut self) -> Result<usize> {
        self.cache.invalidate(&ResourceKey::ORDERS);
        self.load().await
    }

    /// Feed a new search term; it applies once input has been quiet for the
    /// configured debounce delay.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search.submit(text.into());
    }

    /// Wait until the pending search term applies, returning it.
    pub async fn settle_search(&mut self) -> String {
        self.search.settle().await
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    /// The query the board is currently derived from.
    pub fn query(&mut self) -> BoardQuery {
        BoardQuery {
            search: self.search.current().clone(),
            filter: self.filter,
            current_user: self.config.current_user.clone(),
            sort_by_priority: self.config.board.sort_columns,
        }
    }

    /// Visible columns for `today`.
    pub fn view(&mut self, today: Date) -> Columns {
        let query = self.query();
        let orders = self.board().snapshot();
        BoardView::derive(&orders, &query, today)
    }

    /// Visible columns in drag surface order, so in-column reorders show.
    pub fn arranged_view(&mut self, today: Date) -> Columns {
        let columns = self.view(today);
        self.drag.sync(&columns);
        self.drag.arrange(columns)
    }

    /// Pick up a visible card and drop it on `target`. Only a drop on
    /// another column reaches the backend.
    pub async fn drop_order(&mut self, id: &OrderId, target: DropTarget) -> DropResult {
        let today = self.today();
        let columns = self.view(today);
        self.drag.sync(&columns);
        if !self.drag.begin(id) {
            return DropResult::NotVisible;
        }
        match self.drag.drop_on(target) {
            DropOutcome::Move(event) => DropResult::Moved(self.handle_move(event).await),
            DropOutcome::Reordered => DropResult::Reordered,
            DropOutcome::NoOp => DropResult::NoOp,
        }
    }

    /// Move an order optimistically; see [`Orchestrator::move_order`].
    pub async fn move_order(&mut self, id: &OrderId, status: Status) -> MoveOutcome {
        self.handle_move(MoveEvent {
            order_id: id.clone(),
            target: status,
        })
        .await
    }

    async fn handle_move(&mut self, event: MoveEvent) -> MoveOutcome {
        let outcome = self.orchestrator.handle(event).await;
        if outcome.is_confirmed() {
            self.cache.invalidate(&ResourceKey::ORDERS);
        }
        outcome
    }

    /// Validate the form and create the order, putting it at the top of the
    /// board.
    ///
    /// # Errors
    ///
    /// Returns `GarageError::Validation` without calling the backend when the
    /// form is invalid, or the backend error when creation fails.
    pub async fn create_order(&mut self, form: &NewOrderForm) -> Result<Order> {
        let valid = form.validate()?;
        let order = match self.backend.create_order(&valid).await {
            Ok(order) => order,
            Err(e) => {
                warn!("Failed to create order: {e}");
                self.notifier
                    .notify(OperationStatus::failure("Failed to create order"));
                return Err(e);
            }
        };

        info!("Created order {}", order.id);
        self.board().with(|board| board.prepend(order.clone()));
        self.cache.invalidate(&ResourceKey::ORDERS);
        self.notifier
            .notify(OperationStatus::success("New order created"));
        Ok(order)
    }

    /// Apply detail edits to an order.
    ///
    /// # Errors
    ///
    /// Returns `GarageError::InvalidInput` for an empty request,
    /// `GarageError::Validation` for invalid edits,
    /// `GarageError::OrderNotFound` for unknown orders, or the backend error.
    pub async fn update_order(
        &mut self,
        id: &OrderId,
        request: &UpdateOrderRequest,
    ) -> Result<UpdateResult<Order>> {
        if request.is_empty() {
            return Err(GarageError::invalid_input("request")
                .with_reason("pass at least one field to change"));
        }
        request.validate()?;

        let mut current = match self.board().with(|board| board.get(id).cloned()) {
            Some(order) => order,
            None => self
                .backend
                .get_order(id)
                .await?
                .ok_or_else(|| GarageError::OrderNotFound { id: id.to_string() })?,
        };
        let changes = request.apply_to(&mut current);

        let updated = match self.backend.update_order(id, request).await {
            Ok(order) => order,
            Err(e) => {
                warn!("Failed to update {id}: {e}");
                self.notifier
                    .notify(OperationStatus::failure("Failed to update order"));
                return Err(e);
            }
        };

        self.board().with(|board| board.replace_order(updated.clone()));
        self.cache.invalidate(&ResourceKey::ORDERS);
        self.notifier.notify(OperationStatus::success("Order updated"));
        Ok(UpdateResult::with_changes(updated, changes))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use jiff::Timestamp;

    use super::*;
    use crate::{
        backend::MemoryBackend, board::RecordingNotifier, clock::ManualClock, demo,
        models::Priority,
    };

    struct Fixture {
        backend: Arc<MemoryBackend>,
        notifier: Arc<RecordingNotifier>,
        clock: Arc<ManualClock>,
        session: BoardSession<MemoryBackend, RecordingNotifier>,
    }

    async fn fixture() -> Fixture {
        let backend = Arc::new(MemoryBackend::new());
        demo::seed_demo_orders(backend.as_ref()).await.unwrap();
        let notifier = Arc::new(RecordingNotifier::new());
        // 2023-05-10 12:00:00 UTC
        let clock = Arc::new(ManualClock::new(Timestamp::from_second(1683720000).unwrap()));
        let session = BoardSession::new(
            backend.clone(),
            notifier.clone(),
            GarageConfig::default(),
            clock.clone(),
        );
        Fixture {
            backend,
            notifier,
            clock,
            session,
        }
    }

    fn form(title: &str) -> NewOrderForm {
        NewOrderForm {
            title: title.to_string(),
            customer_name: "Emma Davis".to_string(),
            make: "Subaru".to_string(),
            model: "Outback".to_string(),
            year: "2022".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_load_uses_cache_until_refresh() {
        let mut f = fixture().await;
        assert_eq!(f.session.load().await.unwrap(), 6);
        assert_eq!(f.session.load().await.unwrap(), 6);
        assert_eq!(f.backend.fetch_calls(), 1);

        f.session.refresh().await.unwrap();
        assert_eq!(f.backend.fetch_calls(), 2);
    }

    #[tokio::test]
    async fn test_cache_expires_after_ttl() {
        let mut f = fixture().await;
        f.session.load().await.unwrap();
        f.clock.advance(jiff::SignedDuration::from_secs(31));
        f.session.load().await.unwrap();
        assert_eq!(f.backend.fetch_calls(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_board_empty() {
        let mut f = fixture().await;
        f.backend.fail_fetches(true);

        let err = f.session.load().await.unwrap_err();
        assert!(matches!(err, GarageError::Backend { .. }));
        assert!(f.session.board().snapshot().is_empty());
        let today = f.session.today();
        assert!(f.session.view(today).is_empty());
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_backend() {
        let mut f = fixture().await;
        f.session.load().await.unwrap();
        let creates = f.backend.create_calls();

        let err = f.session.create_order(&form("Oi")).await.unwrap_err();
        match err {
            GarageError::Validation(errors) => assert_eq!(
                errors.message_for("title"),
                Some("Title must be at least 3 characters")
            ),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(f.backend.create_calls(), creates);
    }

    #[tokio::test]
    async fn test_created_order_is_prepended() {
        let mut f = fixture().await;
        f.session.load().await.unwrap();

        let order = f.session.create_order(&form("Wheel Alignment")).await.unwrap();
        assert_eq!(order.status, Status::Pending);
        assert_eq!(f.session.board().snapshot()[0].id, order.id);
        assert_eq!(
            f.notifier.take().last(),
            Some(&OperationStatus::success("New order created"))
        );

        // Cache was invalidated, so the next load refetches.
        f.session.load().await.unwrap();
        assert_eq!(f.backend.fetch_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_applies_after_debounce() {
        let mut f = fixture().await;
        f.session.load().await.unwrap();
        let today = f.session.today();

        f.session.set_search("bra");
        f.session.set_search("BRAKE");
        assert_eq!(f.session.view(today).total(), 6);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(f.session.view(today).total(), 1);

        f.session.set_search("");
        assert_eq!(f.session.settle_search().await, "");
        assert_eq!(f.session.view(today).total(), 6);
    }

    #[tokio::test]
    async fn test_due_today_filter_uses_clock() {
        let mut f = fixture().await;
        f.session.load().await.unwrap();
        f.session.set_filter(CategoryFilter::DueToday);

        let today = f.session.today();
        let columns = f.session.view(today);
        assert_eq!(columns.total(), 1);
        assert_eq!(columns.column(Status::Pending)[0].title, "Oil Change");
    }

    #[tokio::test]
    async fn test_my_filter_defaults_to_mike_johnson() {
        let mut f = fixture().await;
        f.session.load().await.unwrap();
        f.session.set_filter(CategoryFilter::My);

        let today = f.session.today();
        let columns = f.session.view(today);
        assert_eq!(columns.total(), 2);
        assert_eq!(columns.column(Status::Pending)[0].title, "Oil Change");
        assert_eq!(
            columns.column(Status::InProgress)[0].title,
            "Brake Replacement"
        );
    }

    #[tokio::test]
    async fn test_update_order_reports_changes() {
        let mut f = fixture().await;
        f.session.load().await.unwrap();
        let id = OrderId::new("order-3");

        let request = UpdateOrderRequest {
            priority: Some(Priority::High),
            title: Some("Tire Rotation".to_string()),
            ..Default::default()
        };
        let result = f.session.update_order(&id, &request).await.unwrap();
        assert_eq!(result.changes, vec!["priority".to_string()]);
        assert_eq!(
            f.session
                .board()
                .with(|board| board.get(&id).map(|o| o.priority)),
            Some(Priority::High)
        );

        let missing = f
            .session
            .update_order(&OrderId::new("order-99"), &request)
            .await
            .unwrap_err();
        assert!(matches!(missing, GarageError::OrderNotFound { .. }));

        let empty = f
            .session
            .update_order(&id, &UpdateOrderRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(empty, GarageError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_drop_routes_through_drag_surface() {
        let mut f = fixture().await;
        f.session.load().await.unwrap();
        let today = f.session.today();
        let pending: Vec<OrderId> = f
            .session
            .arranged_view(today)
            .column(Status::Pending)
            .iter()
            .map(|o| o.id.clone())
            .collect();
        assert!(pending.len() >= 2);
        let last = pending[pending.len() - 1].clone();

        let reordered = f
            .session
            .drop_order(&last, DropTarget::before(Status::Pending, pending[0].clone()))
            .await;
        assert!(matches!(reordered, DropResult::Reordered));
        assert_eq!(f.session.arranged_view(today).column(Status::Pending)[0].id, last);

        let same = f
            .session
            .drop_order(&last, DropTarget::column(Status::Pending))
            .await;
        assert!(matches!(same, DropResult::Reordered));
        let same_again = f
            .session
            .drop_order(&last, DropTarget::column(Status::Pending))
            .await;
        assert!(matches!(same_again, DropResult::NoOp));
        assert_eq!(f.backend.update_calls(), 0);

        let moved = f
            .session
            .drop_order(&last, DropTarget::column(Status::Completed))
            .await;
        assert!(matches!(moved, DropResult::Moved(MoveOutcome::Confirmed(_))));
        assert_eq!(f.backend.update_calls(), 1);
        assert_eq!(f.session.board().status_of(&last), Some(Status::Completed));

        let hidden = f
            .session
            .drop_order(&OrderId::new("order-99"), DropTarget::column(Status::Pending))
            .await;
        assert!(matches!(hidden, DropResult::NotVisible));
    }

    #[tokio::test]
    async fn test_load_discards_local_reorder() {
        let mut f = fixture().await;
        f.session.load().await.unwrap();
        let today = f.session.today();
        let before = f.session.arranged_view(today);
        let pending = before.column(Status::Pending);
        let last = pending[pending.len() - 1].id.clone();
        let first = pending[0].id.clone();

        f.session
            .drop_order(&last, DropTarget::before(Status::Pending, first))
            .await;
        f.session.refresh().await.unwrap();
        assert_eq!(f.session.arranged_view(today), before);
    }

    #[tokio::test]
    async fn test_confirmed_move_invalidates_cache() {
        let mut f = fixture().await;
        f.session.load().await.unwrap();

        let outcome = f
            .session
            .move_order(&OrderId::new("order-1"), Status::InProgress)
            .await;
        assert!(outcome.is_confirmed());

        f.session.load().await.unwrap();
        assert_eq!(f.backend.fetch_calls(), 2);
        assert_eq!(
            f.session.board().status_of(&OrderId::new("order-1")),
            Some(Status::InProgress)
        );
    }
}
