//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        // Boards created before assignments were tracked lack the column
        let has_assignee_column: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('orders') WHERE name = 'assigned_to'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .db_context("Failed to inspect orders table")?;

        if !has_assignee_column {
            self.connection
                .execute("ALTER TABLE orders ADD COLUMN assigned_to TEXT", [])
                .db_context("Failed to add assigned_to column to orders table")?;
        }

        Ok(())
    }
}
