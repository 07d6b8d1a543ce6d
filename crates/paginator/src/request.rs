//! Incoming page requests.
//!
//! Turns a requested page size and an optional cursor token into the parameters the
//! data-fetch layer needs: how many rows to fetch, which boundary value to compare
//! against, and in which direction.

use std::fmt;

use crate::config::PaginationConfig;
use crate::cursor::{Cursor, CursorDirection, decode_cursor};
use crate::error::PaginationResult;

/// The comparison the data-fetch layer applies to the boundary field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Records at or after the boundary value. A next cursor holds the first
    /// record of the next page, so that record must be included.
    GreaterThanOrEqual,
    /// Records strictly before the boundary value.
    LessThan,
}

impl Comparison {
    /// Returns the SQL operator for this comparison.
    pub fn as_sql_operator(self) -> &'static str {
        match self {
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql_operator())
    }
}

/// A decoded request for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    limit: usize,
    cursor: Option<Cursor>,
}

impl PageRequest {
    /// Creates a request for the first page.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            cursor: None,
        }
    }

    /// Creates a request continuing from a decoded cursor.
    pub fn with_cursor(limit: usize, cursor: Cursor) -> Self {
        Self {
            limit,
            cursor: Some(cursor),
        }
    }

    /// Creates a request from an optional cursor token.
    ///
    /// A missing or empty token means the first page.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::Decode`](crate::PaginationError::Decode) if the
    /// token is present but malformed.
    pub fn from_token(limit: usize, token: Option<&str>) -> PaginationResult<Self> {
        match token.filter(|t| !t.is_empty()) {
            Some(token) => Ok(Self::with_cursor(limit, decode_cursor(token)?)),
            None => Ok(Self::new(limit)),
        }
    }

    /// Creates a request whose limit is resolved against `config`.
    pub fn from_config(
        config: &PaginationConfig,
        requested_limit: Option<usize>,
        token: Option<&str>,
    ) -> PaginationResult<Self> {
        Self::from_token(config.effective_limit(requested_limit), token)
    }

    /// Returns the page size.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the incoming cursor, if any.
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// Returns the incoming direction, if any.
    pub fn direction(&self) -> Option<CursorDirection> {
        self.cursor.as_ref().map(Cursor::direction)
    }

    /// Returns the incoming boundary value, or an empty string on the first page.
    pub fn boundary_value(&self) -> &str {
        self.cursor.as_ref().map_or("", Cursor::value)
    }

    /// Returns the number of records to fetch: one more than the page size.
    pub fn fetch_limit(&self) -> usize {
        self.limit.saturating_add(1)
    }

    /// Returns the predicate to apply to the boundary field.
    pub fn comparison(&self) -> Option<Comparison> {
        self.direction().map(|direction| match direction {
            CursorDirection::Next => Comparison::GreaterThanOrEqual,
            CursorDirection::Previous => Comparison::LessThan,
        })
    }

    /// Returns true if no cursor was supplied.
    pub fn is_first_page(&self) -> bool {
        self.cursor.is_none()
    }
}
