//! Helios Cursor Paginator
//!
//! Cursor-based pagination over records that have already been fetched. Given an
//! over-fetched slice, a page size and the boundary value of the incoming cursor,
//! it decides which records form the current page and produces opaque tokens for
//! the previous and next pages.
//!
//! The crate does not talk to a data store. The caller fetches `limit + 1` records
//! ordered by a boundary field, filtered by the comparison derived from the incoming
//! cursor, and hands them over.
//!
//! # Architecture
//!
//! - [`cursor`] - The [`Cursor`] type and its base64 token codec
//! - [`boundary`] - Reading a named boundary field off any `Serialize` record
//! - [`page`] - Building a [`Page`] from fetched records
//! - [`request`] - Turning an incoming token into fetch parameters
//! - [`config`] - Page size configuration
//! - [`error`] - Error types
//!
//! # Features
//!
//! - `cli` - `clap` argument derive for [`PaginationConfig`] and `init_logging`
//!   through `tracing-subscriber`. Off by default; the library itself only emits
//!   `tracing` events.
//!
//! # Quick Start
//!
//! ```
//! use helios_paginator::{Page, PageRequest};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Book {
//!     #[serde(rename = "ID")]
//!     id: u32,
//!     title: String,
//! }
//!
//! let books: Vec<Book> = (1..=7)
//!     .map(|id| Book { id, title: format!("Book {id}") })
//!     .collect();
//!
//! // First request: no cursor
//! let request = PageRequest::from_token(3, None).unwrap();
//! let fetched: Vec<Book> = books.into_iter().take(request.fetch_limit()).collect();
//!
//! let page = Page::new(fetched, request.limit(), "ID", request.boundary_value()).unwrap();
//! assert_eq!(page.total(), 3);
//! assert_eq!(page.cursor_values(), ("", "4"));
//!
//! // The next request carries the encoded cursor
//! let (_, next) = page.encoded_cursors();
//! let request = PageRequest::from_token(3, Some(next)).unwrap();
//! assert_eq!(request.boundary_value(), "4");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod boundary;
pub mod config;
pub mod cursor;
pub mod error;
#[cfg(feature = "cli")]
mod logging;
pub mod page;
pub mod request;
mod util;

pub use boundary::boundary_value;
pub use config::PaginationConfig;
pub use cursor::{Cursor, CursorDirection, decode_cursor, encode_cursor};
pub use error::{PaginationError, PaginationResult};
#[cfg(feature = "cli")]
pub use logging::init_logging;
pub use page::Page;
pub use request::{Comparison, PageRequest};
pub use util::reverse;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
