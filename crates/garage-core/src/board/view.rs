//! Column derivation for the board.

use jiff::civil::Date;

use crate::models::{BoardQuery, CategoryFilter, Order, Priority, Status};

/// Orders split into the three board columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Columns {
    columns: [Vec<Order>; 3],
}

impl Columns {
    /// Orders in the column for `status`.
    pub fn column(&self, status: Status) -> &[Order] {
        &self.columns[status.column_index()]
    }

    /// Columns paired with their status, in board order.
    pub fn iter(&self) -> impl Iterator<Item = (Status, &[Order])> {
        Status::ALL
            .into_iter()
            .map(move |status| (status, self.column(status)))
    }

    pub fn counts(&self) -> [usize; 3] {
        [
            self.columns[0].len(),
            self.columns[1].len(),
            self.columns[2].len(),
        ]
    }

    pub fn total(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Stable sort of one column by `key`.
    pub(crate) fn sort_column_by_key(
        &mut self,
        status: Status,
        key: impl FnMut(&Order) -> usize,
    ) {
        self.columns[status.column_index()].sort_by_key(key);
    }
}

/// Pure derivation of [`Columns`] from an order collection.
pub struct BoardView;

impl BoardView {
    /// Derive the visible columns.
    ///
    /// The search term is trimmed and matched case-insensitively, then the
    /// category filter is applied against `today`. Each column keeps the
    /// collection order unless the query asks for a priority sort, which is
    /// stable.
    ///
    /// ```rust
    /// use garage_core::{board::BoardView, models::{BoardQuery, Status}};
    ///
    /// let columns = BoardView::derive(&[], &BoardQuery::default(), jiff::civil::date(2023, 5, 10));
    /// assert!(columns.column(Status::Pending).is_empty());
    /// ```
    pub fn derive(orders: &[Order], query: &BoardQuery, today: Date) -> Columns {
        let needle = query.search.trim().to_lowercase();
        let mut columns = Columns::default();

        for order in Self::filter(orders, &needle, query, today) {
            columns.columns[order.status.column_index()].push(order.clone());
        }

        if query.sort_by_priority {
            for column in &mut columns.columns {
                column.sort_by(|a, b| Priority::cmp_urgency(&a.priority, &b.priority));
            }
        }
        columns
    }

    fn filter<'a>(
        orders: &'a [Order],
        needle: &'a str,
        query: &'a BoardQuery,
        today: Date,
    ) -> impl Iterator<Item = &'a Order> {
        orders
            .iter()
            .filter(move |order| order.matches_search(needle))
            .filter(move |order| match query.filter {
                CategoryFilter::All => true,
                CategoryFilter::My => order
                    .assigned_to
                    .as_ref()
                    .is_some_and(|a| a.matches_identity(&query.current_user)),
                CategoryFilter::DueToday => order.due_date == Some(today),
            })
    }
}
