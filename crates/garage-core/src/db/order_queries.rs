//! Order CRUD operations and queries.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, GarageError, Result},
    models::{Assignee, Customer, Order, OrderId, Priority, Status, UpdateOrderRequest, Vehicle},
    validation::ValidOrder,
};

const ORDER_COLUMNS: &str = "id, title, description, priority, status, customer_name, vehicle_make, vehicle_model, vehicle_year, due_date, assigned_to, created_at";
const NEXT_SEQ_SQL: &str = "SELECT COALESCE(MAX(seq), 0) + 1 FROM orders";
const INSERT_ORDER_SQL: &str = "INSERT INTO orders (seq, id, title, description, priority, status, customer_name, vehicle_make, vehicle_model, vehicle_year, due_date, assigned_to, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)";
const UPDATE_STATUS_SQL: &str = "UPDATE orders SET status = ?1, updated_at = ?2 WHERE id = ?3";
const UPDATE_DETAILS_SQL: &str = "UPDATE orders SET title = ?1, description = ?2, priority = ?3, due_date = ?4, assigned_to = ?5, updated_at = ?6 WHERE id = ?7";

impl super::Database {
    /// Helper function to construct an Order from a database row
    fn build_order_from_row(row: &rusqlite::Row) -> rusqlite::Result<Order> {
        let priority_str: String = row.get(3)?;
        let priority = priority_str.parse::<Priority>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, Type::Text, e.into())
        })?;

        let status_str: String = row.get(4)?;
        let status = status_str.parse::<Status>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, Type::Text, e.into())
        })?;

        let due_date = row
            .get::<_, Option<String>>(9)?
            .map(|s| s.parse::<Date>())
            .transpose()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(e)))?;

        // Assignees are stored as tagged JSON to keep both record shapes
        let assigned_to = row
            .get::<_, Option<String>>(10)?
            .map(|s| serde_json::from_str::<Assignee>(&s))
            .transpose()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(10, Type::Text, Box::new(e)))?;

        let created_at = row
            .get::<_, String>(11)?
            .parse::<Timestamp>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(11, Type::Text, Box::new(e)))?;

        Ok(Order {
            id: OrderId(row.get(0)?),
            title: row.get(1)?,
            description: row.get(2)?,
            priority,
            status,
            customer: Customer { name: row.get(5)? },
            vehicle: Vehicle {
                make: row.get(6)?,
                model: row.get(7)?,
                year: row.get(8)?,
            },
            due_date,
            assigned_to,
            created_at: Some(created_at),
        })
    }

    /// Inserts a validated order. The store assigns the id and creation
    /// time; new orders always start as pending.
    pub fn create_order(&mut self, order: &ValidOrder) -> Result<Order> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let seq: i64 = tx
            .query_row(NEXT_SEQ_SQL, [], |row| row.get(0))
            .db_context("Failed to allocate order id")?;
        let id = OrderId(format!("order-{seq}"));

        let now = Timestamp::now();
        let now_str = now.to_string();
        let assigned_to = order
            .assigned_to
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        tx.execute(
            INSERT_ORDER_SQL,
            params![
                seq,
                id.as_str(),
                &order.title,
                order.description.as_deref(),
                order.priority.as_str(),
                Status::Pending.as_str(),
                &order.customer.name,
                &order.vehicle.make,
                &order.vehicle.model,
                order.vehicle.year,
                order.due_date.map(|d| d.to_string()),
                assigned_to,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert order")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Order {
            id,
            title: order.title.clone(),
            description: order.description.clone(),
            priority: order.priority,
            status: Status::Pending,
            customer: order.customer.clone(),
            vehicle: order.vehicle.clone(),
            due_date: order.due_date,
            assigned_to: order.assigned_to.clone(),
            created_at: Some(now),
        })
    }

    /// Retrieves a single order by its ID.
    pub fn get_order(&self, id: &str) -> Result<Option<Order>> {
        self.connection
            .query_row(
                &format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"),
                params![id],
                Self::build_order_from_row,
            )
            .optional()
            .db_context("Failed to get order")
    }

    /// Lists all orders in creation order.
    pub fn list_orders(&self) -> Result<Vec<Order>> {
        let mut stmt = self
            .connection
            .prepare(&format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY seq"))
            .db_context("Failed to prepare order query")?;

        let orders = stmt
            .query_map([], Self::build_order_from_row)
            .db_context("Failed to query orders")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read order row")?;

        Ok(orders)
    }

    /// Moves an order to another column. Setting the current status again is
    /// accepted and leaves the same end state.
    pub fn update_status(&mut self, id: &str, status: Status) -> Result<Order> {
        let now_str = Timestamp::now().to_string();
        let changed = self
            .connection
            .execute(UPDATE_STATUS_SQL, params![status.as_str(), &now_str, id])
            .db_context("Failed to update order status")?;

        if changed == 0 {
            return Err(GarageError::OrderNotFound { id: id.to_string() });
        }

        self.get_order(id)?
            .ok_or_else(|| GarageError::OrderNotFound { id: id.to_string() })
    }

    /// Applies detail edits to an order.
    pub fn update_order(&mut self, id: &str, request: &UpdateOrderRequest) -> Result<Order> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut order = tx
            .query_row(
                &format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"),
                params![id],
                Self::build_order_from_row,
            )
            .optional()
            .db_context("Failed to get order")?
            .ok_or_else(|| GarageError::OrderNotFound { id: id.to_string() })?;

        request.apply_to(&mut order);

        let assigned_to = order
            .assigned_to
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        tx.execute(
            UPDATE_DETAILS_SQL,
            params![
                &order.title,
                order.description.as_deref(),
                order.priority.as_str(),
                order.due_date.map(|d| d.to_string()),
                assigned_to,
                Timestamp::now().to_string(),
                id
            ],
        )
        .db_context("Failed to update order")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(order)
    }
}
