//! In-process order backend with fault injection.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex, MutexGuard,
    },
    time::Duration,
};

use jiff::Timestamp;
use log::debug;

use super::OrderBackend;
use crate::{
    error::{GarageError, Result},
    models::{Order, OrderId, Status, UpdateOrderRequest},
    validation::ValidOrder,
};

/// Backend holding orders in memory.
///
/// Besides storing orders it counts calls and can be told to fail or delay
/// specific status updates, which is how board behavior under a flaky
/// backend is exercised.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    orders: Mutex<Vec<Order>>,
    next_id: AtomicUsize,
    update_calls: AtomicUsize,
    create_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
    fail_fetch: AtomicBool,
    fail_all_updates: AtomicBool,
    failing_updates: Mutex<HashSet<OrderId>>,
    update_latency: Mutex<HashMap<OrderId, Duration>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with orders.
    pub fn with_orders(orders: Vec<Order>) -> Self {
        let backend = Self::default();
        backend.next_id.store(orders.len(), Ordering::SeqCst);
        *backend.lock_orders() = orders;
        backend
    }

    /// Make every status update fail until cleared.
    pub fn fail_updates(&self, fail: bool) {
        self.fail_all_updates.store(fail, Ordering::SeqCst);
    }

    /// Make status updates of one order fail.
    pub fn fail_update_of(&self, id: impl Into<OrderId>) {
        lock(&self.failing_updates).insert(id.into());
    }

    /// Make fetches fail until cleared.
    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    /// Delay status updates of one order before they resolve.
    pub fn delay_update_of(&self, id: impl Into<OrderId>, latency: Duration) {
        lock(&self.update_latency).insert(id.into(), latency);
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Backend-side status of an order.
    pub fn status_of(&self, id: &str) -> Option<Status> {
        self.lock_orders()
            .iter()
            .find(|o| o.id.as_str() == id)
            .map(|o| o.status)
    }

    fn lock_orders(&self) -> MutexGuard<'_, Vec<Order>> {
        lock(&self.orders)
    }
}

// A poisoned lock only means another test thread panicked mid-update; the
// data is still usable.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl OrderBackend for MemoryBackend {
    async fn fetch_all(&self) -> Result<Vec<Order>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(GarageError::backend("Failed to fetch orders"));
        }
        Ok(self.lock_orders().clone())
    }

    async fn get_order(&self, id: &OrderId) -> Result<Option<Order>> {
        Ok(self.lock_orders().iter().find(|o| &o.id == id).cloned())
    }

    async fn update_status(&self, id: &OrderId, status: Status) -> Result<Order> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);

        let latency = lock(&self.update_latency).get(id).copied();
        if let Some(latency) = latency {
            debug!("Delaying update of {id} by {latency:?}");
            tokio::time::sleep(latency).await;
        }

        let failing =
            self.fail_all_updates.load(Ordering::SeqCst) || lock(&self.failing_updates).contains(id);
        if failing {
            return Err(GarageError::backend("Failed to update order status"));
        }

        let mut orders = self.lock_orders();
        let order = orders
            .iter_mut()
            .find(|o| &o.id == id)
            .ok_or_else(|| GarageError::OrderNotFound { id: id.to_string() })?;
        order.status = status;
        Ok(order.clone())
    }

    async fn create_order(&self, order: &ValidOrder) -> Result<Order> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let seq = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = Order {
            id: OrderId(format!("order-{seq}")),
            title: order.title.clone(),
            description: order.description.clone(),
            priority: order.priority,
            status: Status::Pending,
            customer: order.customer.clone(),
            vehicle: order.vehicle.clone(),
            due_date: order.due_date,
            assigned_to: order.assigned_to.clone(),
            created_at: Some(Timestamp::now()),
        };
        self.lock_orders().push(created.clone());
        Ok(created)
    }

    async fn update_order(&self, id: &OrderId, request: &UpdateOrderRequest) -> Result<Order> {
        let mut orders = self.lock_orders();
        let order = orders
            .iter_mut()
            .find(|o| &o.id == id)
            .ok_or_else(|| GarageError::OrderNotFound { id: id.to_string() })?;
        request.apply_to(order);
        Ok(order.clone())
    }
}
