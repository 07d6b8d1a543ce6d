//! In-memory record source.
//!
//! Plays the part of the data-fetch layer: records are kept ordered by the boundary
//! field, and each request selects the slice a keyset query would return, including
//! the over-fetched sentinel.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;
use helios_paginator::boundary::natural_string;
use helios_paginator::{CursorDirection, PageRequest, boundary_value, reverse};
use serde_json::{Number, Value};

/// Records fetched for one request.
#[derive(Debug)]
pub struct Fetched {
    /// Records in forward order, at most `limit + 1`.
    pub records: Vec<Value>,
    /// Whether any record sorts before the first fetched one.
    pub has_before: bool,
}

/// A table of JSON records ordered by one boundary field.
#[derive(Debug)]
pub struct MemorySource {
    field: String,
    records: Vec<Value>,
    /// JSON kinds present in the boundary column, see [`kind`].
    kinds: BTreeSet<u8>,
}

impl MemorySource {
    /// Loads a JSON array of objects from `path`.
    pub fn load(path: &Path, field: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let records: Vec<Value> = serde_json::from_str(&text)
            .with_context(|| format!("{} is not a JSON array", path.display()))?;
        Self::new(records, field)
    }

    /// Builds a source, ordering the records by `field`.
    pub fn new(mut records: Vec<Value>, field: &str) -> anyhow::Result<Self> {
        for (index, record) in records.iter().enumerate() {
            boundary_value(record, field).with_context(|| format!("Record {index}"))?;
        }

        records.sort_by(|a, b| compare_values(&a[field], &b[field]));
        let kinds = records.iter().map(|r| kind(&r[field])).collect();
        tracing::debug!(count = records.len(), field, "Loaded records");

        Ok(Self {
            field: field.to_string(),
            records,
            kinds,
        })
    }

    /// Returns the boundary field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Selects the records for `request`.
    ///
    /// A `Next` cursor past the last record selects nothing.
    pub fn fetch(&self, request: &PageRequest) -> Fetched {
        let limit = request.limit();
        let boundary = request.boundary_value();
        let key = self.boundary_key(boundary);

        // Index of the first record at or after the boundary
        let split = self
            .records
            .partition_point(|r| compare_values(&r[&self.field], &key) == Ordering::Less);

        let fetched = match request.direction() {
            None => self.forward(0, request),
            Some(CursorDirection::Next) => self.forward(split, request),
            Some(CursorDirection::Previous) => {
                // Scan backwards from the boundary, as a descending query would
                let before: Vec<Value> = self.records[..split]
                    .iter()
                    .rev()
                    .take(limit)
                    .cloned()
                    .collect();

                if before.len() < limit {
                    self.forward(0, request)
                } else {
                    let mut records = reverse(&before);
                    records.extend(self.records.get(split).cloned());
                    Fetched {
                        records,
                        has_before: split > limit,
                    }
                }
            }
        };

        tracing::debug!(
            direction = ?request.direction(),
            boundary,
            fetched = fetched.records.len(),
            has_before = fetched.has_before,
            "Fetched records"
        );

        fetched
    }

    /// Reads a cursor's boundary string back as a value of the column's type.
    ///
    /// The string is taken as null, a boolean or a number only when the column holds
    /// values of that kind, so numeric-looking text in a string column stays text.
    fn boundary_key(&self, boundary: &str) -> Value {
        if boundary.is_empty() && self.kinds.contains(&NULL) {
            return Value::Null;
        }

        if self.kinds.contains(&BOOL)
            && let Ok(b) = boundary.parse::<bool>()
        {
            return Value::Bool(b);
        }

        if self.kinds.contains(&NUMBER)
            && let Some(n) = parse_number(boundary)
        {
            return Value::Number(n);
        }

        Value::String(boundary.to_string())
    }

    fn forward(&self, start: usize, request: &PageRequest) -> Fetched {
        Fetched {
            records: self.records[start..]
                .iter()
                .take(request.fetch_limit())
                .cloned()
                .collect(),
            has_before: start > 0,
        }
    }
}

const NULL: u8 = 0;
const BOOL: u8 = 1;
const NUMBER: u8 = 2;

/// Ranks JSON kinds: null, booleans, numbers, strings, arrays, objects.
fn kind(value: &Value) -> u8 {
    match value {
        Value::Null => NULL,
        Value::Bool(_) => BOOL,
        Value::Number(_) => NUMBER,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order over field values: by kind first, then within the kind.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    kind(a).cmp(&kind(b)).then_with(|| match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => natural_string(a.clone()).cmp(&natural_string(b.clone())),
    })
}

/// Compares integers exactly and falls back to `f64` only when either side is a float.
fn compare_numbers(a: &Number, b: &Number) -> Ordering {
    match (as_i128(a), as_i128(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => {
            let x = a.as_f64().unwrap_or(f64::NAN);
            let y = b.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
    }
}

fn as_i128(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

fn parse_number(text: &str) -> Option<Number> {
    if let Ok(i) = text.parse::<i64>() {
        return Some(i.into());
    }
    if let Ok(u) = text.parse::<u64>() {
        return Some(u.into());
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}
