//! Command definitions and handlers
//!
//! Each subcommand has a clap argument struct converted into the core type
//! it stands for:
//!
//! ```text
//! User Input → CLI Args (clap) → Core types (NewOrderForm, BoardQuery, ...) → BoardSession
//! ```
//!
//! Core types stay free of clap derives; help text and value parsing live
//! here.

use std::{fmt::Write as _, sync::Arc};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use garage_core::{
    board::RecordingNotifier, demo, Assignee, BoardColumns, BoardQuery, BoardSession, BoardView,
    CategoryFilter, CreateResult, DropResult, DropTarget, GarageConfig, GarageError, MoveOutcome,
    NewOrderForm, OrderBackend, OrderId, OrderStore, Orders, Priority, Status, SystemClock,
    UpdateOrderRequest, ValidationErrors,
};
use jiff::civil::Date;
use log::debug;

use crate::renderer::TerminalRenderer;

// ============================================================================
// CLI Argument Wrappers
// ============================================================================

/// Show the board
#[derive(Args, Default)]
pub struct BoardArgs {
    /// Only show orders matching this text
    #[arg(short, long, help = "Case-insensitive search over title, description, customer and vehicle")]
    pub search: Option<String>,
    /// Category filter
    #[arg(short, long, value_enum, default_value_t = FilterArg::All)]
    pub filter: FilterArg,
    /// Keep collection order inside columns instead of sorting by priority
    #[arg(long)]
    pub unsorted: bool,
}

impl From<BoardArgs> for BoardQuery {
    fn from(val: BoardArgs) -> Self {
        BoardQuery {
            search: val.search.unwrap_or_default(),
            filter: val.filter.into(),
            sort_by_priority: !val.unsorted,
            ..Default::default()
        }
    }
}

/// Create a new order
#[derive(Args)]
pub struct CreateOrderArgs {
    /// Title of the job
    pub title: String,
    #[arg(short, long, help = "Details of the job")]
    pub description: Option<String>,
    #[arg(short, long, value_enum, default_value_t = PriorityArg::Medium)]
    pub priority: PriorityArg,
    #[arg(long, help = "Customer name")]
    pub customer: String,
    #[arg(long, help = "Vehicle make")]
    pub make: String,
    #[arg(long, help = "Vehicle model")]
    pub model: String,
    #[arg(long, help = "Four-digit vehicle year")]
    pub year: String,
    #[arg(long, help = "Due date (YYYY-MM-DD)")]
    pub due: Option<Date>,
    #[arg(long, help = "Name of the worker to assign")]
    pub assign: Option<String>,
}

impl From<CreateOrderArgs> for NewOrderForm {
    fn from(val: CreateOrderArgs) -> Self {
        NewOrderForm {
            title: val.title,
            description: val.description,
            priority: val.priority.into(),
            customer_name: val.customer,
            make: val.make,
            model: val.model,
            year: val.year,
            due_date: val.due,
            assigned_to: val.assign,
        }
    }
}

/// Move an order to another column
#[derive(Args)]
pub struct MoveOrderArgs {
    #[arg(help = "ID of the order to move, e.g. order-3")]
    pub id: String,
    #[arg(value_enum, help = "Target column")]
    pub status: StatusArg,
}

/// Show an order
#[derive(Args)]
pub struct ShowOrderArgs {
    #[arg(help = "ID of the order to show")]
    pub id: String,
}

/// Edit the details of an order
#[derive(Args)]
pub struct UpdateOrderArgs {
    #[arg(help = "ID of the order to update")]
    pub id: String,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(short, long, value_enum)]
    pub priority: Option<PriorityArg>,
    #[arg(long, help = "Due date (YYYY-MM-DD)")]
    pub due: Option<Date>,
    #[arg(long, help = "Name of the worker to assign")]
    pub assign: Option<String>,
}

impl UpdateOrderArgs {
    fn into_parts(self) -> (OrderId, UpdateOrderRequest) {
        let request = UpdateOrderRequest {
            title: self.title,
            description: self.description,
            priority: self.priority.map(Priority::from),
            due_date: self.due,
            assigned_to: self.assign.as_deref().map(Assignee::named),
        };
        (OrderId::new(self.id), request)
    }
}

#[derive(Subcommand)]
pub enum OrderCommands {
    #[command(alias = "c")]
    Create(CreateOrderArgs),
    #[command(alias = "m")]
    Move(MoveOrderArgs),
    #[command(alias = "s")]
    Show(ShowOrderArgs),
    #[command(alias = "u")]
    Update(UpdateOrderArgs),
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Pending,
    InProgress,
    Completed,
}

impl From<StatusArg> for Status {
    fn from(val: StatusArg) -> Self {
        match val {
            StatusArg::Pending => Status::Pending,
            StatusArg::InProgress => Status::InProgress,
            StatusArg::Completed => Status::Completed,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(val: PriorityArg) -> Self {
        match val {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
        }
    }
}

#[derive(Copy, Clone, Default, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    #[default]
    All,
    My,
    DueToday,
}

impl From<FilterArg> for CategoryFilter {
    fn from(val: FilterArg) -> Self {
        match val {
            FilterArg::All => CategoryFilter::All,
            FilterArg::My => CategoryFilter::My,
            FilterArg::DueToday => CategoryFilter::DueToday,
        }
    }
}

// ============================================================================
// Command Handlers
// ============================================================================

/// Runs commands against an order store and renders the results.
pub struct Cli {
    store: Arc<OrderStore>,
    notifier: Arc<RecordingNotifier>,
    session: BoardSession<OrderStore, RecordingNotifier>,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(store: OrderStore, config: GarageConfig, renderer: TerminalRenderer) -> Self {
        let store = Arc::new(store);
        let notifier = Arc::new(RecordingNotifier::new());
        let session = BoardSession::new(
            Arc::clone(&store),
            Arc::clone(&notifier),
            config,
            Arc::new(SystemClock),
        );
        Self {
            store,
            notifier,
            session,
            renderer,
        }
    }

    pub(crate) fn session(&mut self) -> &mut BoardSession<OrderStore, RecordingNotifier> {
        &mut self.session
    }

    pub(crate) fn renderer(&self) -> &TerminalRenderer {
        &self.renderer
    }

    pub async fn handle_order_command(&mut self, command: OrderCommands) -> Result<()> {
        match command {
            OrderCommands::Create(args) => self.create_order(args.into()).await,
            OrderCommands::Move(args) => {
                self.load().await?;
                self.move_order(&OrderId::new(args.id), args.status.into())
                    .await
            }
            OrderCommands::Show(args) => self.show_order(&OrderId::new(args.id)).await,
            OrderCommands::Update(args) => {
                let (id, request) = args.into_parts();
                self.update_order(&id, &request).await
            }
        }
    }

    /// Load the orders and print the board for `query`.
    pub async fn show_board(&mut self, mut query: BoardQuery) -> Result<()> {
        let config = self.session.config();
        query.current_user = config.current_user.clone();
        query.sort_by_priority &= config.board.sort_columns;

        let loaded = self.load().await;
        let orders = self.session.board().snapshot();
        let columns = BoardView::derive(&orders, &query, self.session.today());
        self.renderer.render(&BoardColumns(&columns).to_string())?;
        loaded
    }

    /// Print the board as the session currently sees it, including local
    /// reorders.
    pub(crate) fn render_current_board(&mut self) -> Result<()> {
        let today = self.session.today();
        let columns = self.session.arranged_view(today);
        self.renderer.render(&BoardColumns(&columns).to_string())
    }

    pub async fn seed(&mut self) -> Result<()> {
        let created = demo::seed_demo_orders(self.store.as_ref())
            .await
            .context("Failed to seed demo orders")?;
        self.renderer
            .render(&format!("Added {} demo orders\n\n", created.len()))?;
        self.renderer.render(&Orders(created).to_string())
    }

    pub(crate) async fn load(&mut self) -> Result<()> {
        let loaded = self.session.load().await;
        self.flush_notifications()?;
        let count = loaded.context("Failed to load orders")?;
        debug!("Loaded {count} orders");
        Ok(())
    }

    pub(crate) async fn refresh(&mut self) -> Result<()> {
        let loaded = self.session.refresh().await;
        self.flush_notifications()?;
        let count = loaded.context("Failed to reload orders")?;
        debug!("Reloaded {count} orders");
        Ok(())
    }

    /// Drop an order at the end of the `status` column.
    pub(crate) async fn move_order(&mut self, id: &OrderId, status: Status) -> Result<()> {
        self.drop_order(id, DropTarget::column(status)).await
    }

    /// Drop an order on the board the way a drag would: another column
    /// moves it, its own column only changes its place locally.
    pub(crate) async fn drop_order(&mut self, id: &OrderId, target: DropTarget) -> Result<()> {
        if self.session.board().status_of(id).is_none() {
            return Err(anyhow!(GarageError::OrderNotFound { id: id.to_string() }));
        }
        let label = target.status.label();
        let placed = target.before.is_some();

        let result = self.session.drop_order(id, target).await;
        self.flush_notifications()?;

        match result {
            DropResult::Moved(MoveOutcome::Confirmed(_)) => {
                let counts = self.session.board().with(|board| board.counts());
                self.renderer.render(&format!(
                    "Pending: {} | In Progress: {} | Completed: {}\n",
                    counts[0], counts[1], counts[2]
                ))
            }
            DropResult::Moved(MoveOutcome::Reverted(e)) => {
                Err(anyhow!(e).context("Order status was not changed"))
            }
            DropResult::Reordered if placed => self
                .renderer
                .render(&format!("Reordered {id} within {label}\n")),
            DropResult::Reordered => self.renderer.render(&format!(
                "{id} is already {label}, placed at the end of the column\n"
            )),
            DropResult::NoOp | DropResult::Moved(MoveOutcome::Skipped(_)) => self
                .renderer
                .render(&format!("{id} is already {label}\n")),
            DropResult::NotVisible => bail!("Order {id} is hidden by the current search or filter"),
        }
    }

    async fn create_order(&mut self, form: NewOrderForm) -> Result<()> {
        match self.session.create_order(&form).await {
            Ok(order) => {
                self.flush_notifications()?;
                self.renderer.render(&CreateResult::new(order).to_string())
            }
            Err(GarageError::Validation(errors)) => {
                self.renderer.render(&format_field_errors(&errors))?;
                bail!("Order was not created")
            }
            Err(e) => {
                self.flush_notifications()?;
                Err(anyhow!(e).context("Failed to create order"))
            }
        }
    }

    async fn show_order(&self, id: &OrderId) -> Result<()> {
        let order = self
            .store
            .get_order(id)
            .await
            .context("Failed to fetch order")?
            .ok_or_else(|| GarageError::OrderNotFound { id: id.to_string() })?;
        self.renderer.render(&order.to_string())
    }

    async fn update_order(&mut self, id: &OrderId, request: &UpdateOrderRequest) -> Result<()> {
        self.load().await?;
        match self.session.update_order(id, request).await {
            Ok(result) => {
                self.flush_notifications()?;
                self.renderer.render(&result.to_string())
            }
            Err(GarageError::Validation(errors)) => {
                self.renderer.render(&format_field_errors(&errors))?;
                bail!("Order was not updated")
            }
            Err(e) => {
                self.flush_notifications()?;
                Err(anyhow!(e).context("Failed to update order"))
            }
        }
    }

    fn flush_notifications(&self) -> Result<()> {
        self.renderer.render_notifications(&self.notifier.take())
    }
}

fn format_field_errors(errors: &ValidationErrors) -> String {
    let mut output = String::from("Validation failed:\n\n");
    for error in errors.iter() {
        let _ = writeln!(output, "- {}: {}", error.field, error.message);
    }
    output
}
