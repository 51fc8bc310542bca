//! Filter types for deriving board views.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category filter applied after the search term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryFilter {
    /// No filtering
    #[default]
    All,

    /// Orders assigned to the current user
    My,

    /// Orders due today
    DueToday,
}

impl CategoryFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::My => "my",
            CategoryFilter::DueToday => "due-today",
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(CategoryFilter::All),
            "my" => Ok(CategoryFilter::My),
            "due-today" | "due_today" => Ok(CategoryFilter::DueToday),
            _ => Err(format!("Invalid filter: {s}")),
        }
    }
}

/// Identity the "my orders" filter uses unless configured otherwise.
pub const DEFAULT_USER: &str = "Mike Johnson";

/// Everything a board view is derived from besides the orders themselves.
#[derive(Debug, Clone)]
pub struct BoardQuery {
    /// Raw search text; trimmed and lowercased when applied
    pub search: String,

    pub filter: CategoryFilter,

    /// Identity used by [`CategoryFilter::My`]
    pub current_user: String,

    /// Sort each column by priority, high first
    pub sort_by_priority: bool,
}

impl Default for BoardQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            filter: CategoryFilter::All,
            current_user: DEFAULT_USER.to_string(),
            sort_by_priority: true,
        }
    }
}

impl BoardQuery {
    /// Query with only a search term set.
    ///
    /// ```rust
    /// use garage_core::models::{BoardQuery, CategoryFilter};
    ///
    /// let query = BoardQuery::search("brake");
    /// assert_eq!(query.search, "brake");
    /// assert_eq!(query.filter, CategoryFilter::All);
    /// ```
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: term.into(),
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, filter: CategoryFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_current_user(mut self, identity: impl Into<String>) -> Self {
        self.current_user = identity.into();
        self
    }
}
