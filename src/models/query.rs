use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::error::{ClientError, ClientResult};

/// Prompt shown when a search is submitted without a title
pub const EMPTY_SEARCH_PROMPT: &str = "Please enter the movie name for the Recommendations !";

/// Faceted filters served by `filtered_recommendations`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Genre,
    Country,
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Genre => "genre",
            FilterKind::Country => "country",
        }
    }
}

impl Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A search title that is known to be non-blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Rejects titles that are empty after trimming
    pub fn parse(raw: &str) -> ClientResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ClientError::InvalidInput(
                "Search title cannot be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An immutable, self-contained request descriptor
///
/// Every user action builds a fresh one; nothing about the previous query
/// carries over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Auto { location: String, count: u32 },
    Search { title: SearchTerm },
    Filter { kind: FilterKind, value: String },
    Year { year: String },
}

impl Query {
    pub fn category(&self) -> QueryCategory {
        match self {
            Query::Auto { .. } => QueryCategory::Auto,
            Query::Search { .. } | Query::Filter { .. } | Query::Year { .. } => {
                QueryCategory::Results
            }
        }
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Query::Auto { location, count } => write!(f, "auto({}, {})", location, count),
            Query::Search { title } => write!(f, "search({})", title.as_str()),
            Query::Filter { kind, value } => write!(f, "filter({}={})", kind, value),
            Query::Year { year } => write!(f, "year({})", year),
        }
    }
}

/// Requests whose responses compete for the same output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryCategory {
    /// Location-seeded list
    Auto,
    /// Search, filter and year queries sharing the main results list
    Results,
    Autocomplete,
}

impl QueryCategory {
    pub const COUNT: usize = 3;

    pub(crate) fn index(&self) -> usize {
        match self {
            QueryCategory::Auto => 0,
            QueryCategory::Results => 1,
            QueryCategory::Autocomplete => 2,
        }
    }
}

/// Sequence number handed out when a request is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub category: QueryCategory,
    pub seq: u64,
}
