//! Remote data accessors for the board.
//!
//! The board never talks to storage directly; it goes through an
//! [`OrderBackend`]. Two implementations ship with the crate:
//!
//! - [`crate::store::OrderStore`]: SQLite-backed, authoritative storage
//! - [`MemoryBackend`]: in-process storage with call counting and fault
//!   injection, used to exercise optimistic updates
//!
//! Every call returns a [`Result`]; callers decide how a failure is surfaced
//! and nothing is retried here.

use std::future::Future;

use crate::{
    error::Result,
    models::{Order, OrderId, Status, UpdateOrderRequest},
    validation::ValidOrder,
};

pub mod memory;

pub use memory::MemoryBackend;

/// Remote procedure surface of the order backend.
pub trait OrderBackend: Send + Sync {
    /// Fetch every order on the board.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Order>>> + Send;

    /// Fetch one order.
    fn get_order(&self, id: &OrderId) -> impl Future<Output = Result<Option<Order>>> + Send;

    /// Move an order to `status`. Repeating the call yields the same end
    /// state.
    fn update_status(
        &self,
        id: &OrderId,
        status: Status,
    ) -> impl Future<Output = Result<Order>> + Send;

    /// Create an order; the backend assigns `id` and `created_at`.
    fn create_order(&self, order: &ValidOrder) -> impl Future<Output = Result<Order>> + Send;

    /// Apply detail edits to an order.
    fn update_order(
        &self,
        id: &OrderId,
        request: &UpdateOrderRequest,
    ) -> impl Future<Output = Result<Order>> + Send;
}
