//! Page construction.
//!
//! A [`Page`] is built from an already-fetched slice of records. By convention the
//! data-fetch layer asks for `limit + 1` records: if the extra record arrives, there
//! is a next page and that record's boundary value becomes the next cursor.

use std::convert::Infallible;

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

use crate::boundary::boundary_value;
use crate::cursor::{Cursor, encode_cursor};
use crate::error::PaginationResult;

/// A page of results with navigation cursors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    total: usize,
    limit: usize,
    prev_cursor: Option<Cursor>,
    next_cursor: Option<Cursor>,
    results: Vec<T>,
    encoded_prev_cursor: String,
    encoded_next_cursor: String,
}

impl<T: Serialize> Page<T> {
    /// Builds a page, reading boundary values off the field named `boundary_field`.
    ///
    /// `incoming_boundary_value` is the value of the decoded request cursor, or the
    /// empty string on the first page.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::FieldNotFound`](crate::PaginationError::FieldNotFound)
    /// if a cursor is needed and the field cannot be read. No partial page is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use helios_paginator::{Cursor, Page};
    /// use serde_json::json;
    ///
    /// let records: Vec<_> = (1..=7).map(|id| json!({"ID": id})).collect();
    /// let page = Page::new(records, 3, "ID", "").unwrap();
    ///
    /// assert_eq!(page.total(), 3);
    /// assert_eq!(page.next_cursor(), Some(&Cursor::next("4")));
    /// assert!(page.prev_cursor().is_none());
    /// ```
    pub fn new(
        records: Vec<T>,
        limit: usize,
        boundary_field: &str,
        incoming_boundary_value: &str,
    ) -> PaginationResult<Self> {
        Self::build(records, limit, incoming_boundary_value, |record| {
            boundary_value(record, boundary_field)
        })
    }
}

impl<T> Page<T> {
    /// Builds a page using an explicit boundary extractor instead of a field name.
    ///
    /// ```
    /// use helios_paginator::Page;
    ///
    /// struct Row { id: u64 }
    ///
    /// let rows: Vec<Row> = (1..=5).map(|id| Row { id }).collect();
    /// let page = Page::with_extractor(rows, 2, "1", |row| row.id.to_string());
    ///
    /// assert_eq!(page.cursor_values(), ("1", "3"));
    /// ```
    pub fn with_extractor<F>(
        records: Vec<T>,
        limit: usize,
        incoming_boundary_value: &str,
        mut extractor: F,
    ) -> Self
    where
        F: FnMut(&T) -> String,
    {
        let Ok(page) = Self::build(records, limit, incoming_boundary_value, |record| {
            Ok::<_, Infallible>(extractor(record))
        });
        page
    }

    fn build<F, E>(
        mut records: Vec<T>,
        limit: usize,
        incoming_boundary_value: &str,
        mut extract: F,
    ) -> Result<Self, E>
    where
        F: FnMut(&T) -> Result<String, E>,
    {
        let fetched = records.len();
        let mut total = fetched;

        // Only an over-fetched sentinel proves there is a next page
        let next_cursor = if fetched > limit {
            let value = extract(&records[limit])?;
            total = limit;
            Some(Cursor::next(value))
        } else {
            None
        };

        // Not on the first page and something was fetched
        let prev_cursor = match records.first() {
            Some(first) if !incoming_boundary_value.is_empty() && limit > 0 => {
                Some(Cursor::previous(extract(first)?))
            }
            _ => None,
        };

        records.truncate(limit);

        tracing::debug!(
            fetched,
            total,
            limit,
            has_prev = prev_cursor.is_some(),
            has_next = next_cursor.is_some(),
            "Built page"
        );

        Ok(Self {
            total,
            limit,
            encoded_prev_cursor: encode_cursor(prev_cursor.as_ref()),
            encoded_next_cursor: encode_cursor(next_cursor.as_ref()),
            prev_cursor,
            next_cursor,
            results: records,
        })
    }

    /// Returns the number of records in this page.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns the requested page size.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the records in this page.
    pub fn results(&self) -> &[T] {
        &self.results
    }

    /// Consumes the page and returns its records.
    pub fn into_results(self) -> Vec<T> {
        self.results
    }

    /// Returns the cursor for the previous page, if there is one.
    pub fn prev_cursor(&self) -> Option<&Cursor> {
        self.prev_cursor.as_ref()
    }

    /// Returns the cursor for the next page, if there is one.
    pub fn next_cursor(&self) -> Option<&Cursor> {
        self.next_cursor.as_ref()
    }

    /// Returns the encoded previous cursor, or an empty string.
    pub fn encoded_prev_cursor(&self) -> &str {
        &self.encoded_prev_cursor
    }

    /// Returns the encoded next cursor, or an empty string.
    pub fn encoded_next_cursor(&self) -> &str {
        &self.encoded_next_cursor
    }

    /// Returns `(prev, next)` encoded cursors for a response envelope.
    pub fn encoded_cursors(&self) -> (&str, &str) {
        (&self.encoded_prev_cursor, &self.encoded_next_cursor)
    }

    /// Returns `(prev, next)` raw boundary values, empty when a cursor is absent.
    pub fn cursor_values(&self) -> (&str, &str) {
        (
            self.prev_cursor.as_ref().map_or("", Cursor::value),
            self.next_cursor.as_ref().map_or("", Cursor::value),
        )
    }

    /// Returns true if there is a previous page.
    pub fn has_prev(&self) -> bool {
        self.prev_cursor.is_some()
    }

    /// Returns true if there is a next page.
    pub fn has_next(&self) -> bool {
        self.next_cursor.is_some()
    }

    /// Returns true if this page has no results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns the number of results in this page.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Maps the results to a different type, keeping counts and cursors.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            total: self.total,
            limit: self.limit,
            prev_cursor: self.prev_cursor,
            next_cursor: self.next_cursor,
            results: self.results.into_iter().map(f).collect(),
            encoded_prev_cursor: self.encoded_prev_cursor,
            encoded_next_cursor: self.encoded_next_cursor,
        }
    }
}

impl<T: Serialize> Serialize for Page<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Page", 5)?;
        state.serialize_field("total", &self.total)?;
        state.serialize_field("limit", &self.limit)?;
        state.serialize_field("prevCursor", &self.encoded_prev_cursor)?;
        state.serialize_field("nextCursor", &self.encoded_next_cursor)?;
        state.serialize_field("results", &self.results)?;
        state.end()
    }
}
