//! Worker assignment attached to an order.

use serde::{Deserialize, Serialize};

/// The worker an order is assigned to.
///
/// Records arrive in two shapes: staff rows keyed by id with split names, and
/// lightweight display entries carrying only a name and initials. Both are
/// kept intact and read through the same accessors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Assignee {
    /// A staff member known to the backend
    Worker {
        id: String,
        first_name: String,
        last_name: String,
    },
    /// A display-only assignment
    Named {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        initials: String,
    },
}

impl Assignee {
    /// Build a display-only assignee from a free-form name, deriving initials.
    ///
    /// ```rust
    /// use garage_core::models::Assignee;
    ///
    /// let a = Assignee::named("Mike Johnson");
    /// assert_eq!(a.initials(), "MJ");
    /// assert_eq!(a.display_name(), "Mike Johnson");
    /// ```
    pub fn named(name: &str) -> Self {
        let name = name.trim();
        Assignee::Named {
            name: Some(name.to_string()),
            initials: initials_of(name.split_whitespace()),
        }
    }

    /// Name shown on cards.
    pub fn display_name(&self) -> String {
        match self {
            Assignee::Worker {
                first_name,
                last_name,
                ..
            } => format!("{first_name} {last_name}").trim().to_string(),
            Assignee::Named { name, initials } => {
                name.clone().unwrap_or_else(|| initials.clone())
            }
        }
    }

    /// Short initials for avatars.
    pub fn initials(&self) -> String {
        match self {
            Assignee::Worker {
                first_name,
                last_name,
                ..
            } => initials_of([first_name.as_str(), last_name.as_str()].into_iter()),
            Assignee::Named { initials, .. } => initials.clone(),
        }
    }

    /// Backend id, when the assignee is a known worker.
    pub fn id(&self) -> Option<&str> {
        match self {
            Assignee::Worker { id, .. } => Some(id),
            Assignee::Named { .. } => None,
        }
    }

    /// Whether this assignee is the given identity: a worker id or a
    /// display name (case-insensitive).
    pub fn matches_identity(&self, identity: &str) -> bool {
        let identity = identity.trim();
        if identity.is_empty() {
            return false;
        }
        self.id() == Some(identity) || self.display_name().eq_ignore_ascii_case(identity)
    }
}

fn initials_of<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}
