//! Opaque cursor tokens.
//!
//! A [`Cursor`] names the boundary value of an adjacent page and which side of the
//! current page it sits on. Cursors cross transport boundaries as base64-encoded JSON.
//!
//! # Encoding
//!
//! The JSON payload has two fields, in this order:
//! - `DirectionNext`: `true` for [`CursorDirection::Next`], `false` for
//!   [`CursorDirection::Previous`]
//! - `Value`: the boundary value as a string
//!
//! The serialized bytes are encoded with standard base64 (RFC 4648, padded), so
//! `{Next, "next"}` becomes `eyJEaXJlY3Rpb25OZXh0Ijp0cnVlLCJWYWx1ZSI6Im5leHQifQ==`.

use std::fmt;
use std::str::FromStr;

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use crate::error::{PaginationError, PaginationResult};

/// Direction of cursor pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorDirection {
    /// Fetching the next page (forward).
    #[default]
    Next,
    /// Fetching the previous page (backward).
    Previous,
}

impl CursorDirection {
    /// Returns true for [`CursorDirection::Next`].
    pub fn is_next(self) -> bool {
        matches!(self, Self::Next)
    }

    fn from_flag(next: bool) -> Self {
        if next { Self::Next } else { Self::Previous }
    }
}

impl fmt::Display for CursorDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next => write!(f, "next"),
            Self::Previous => write!(f, "previous"),
        }
    }
}

/// An opaque cursor for keyset pagination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor {
    /// The direction of pagination.
    #[serde(rename = "DirectionNext", with = "direction_flag")]
    direction: CursorDirection,

    /// The boundary value of the adjacent page.
    #[serde(rename = "Value")]
    value: String,
}

impl Cursor {
    /// Creates a cursor in the given direction.
    pub fn new(direction: CursorDirection, value: impl Into<String>) -> Self {
        Self {
            direction,
            value: value.into(),
        }
    }

    /// Creates a cursor for the next page.
    pub fn next(value: impl Into<String>) -> Self {
        Self::new(CursorDirection::Next, value)
    }

    /// Creates a cursor for the previous page.
    pub fn previous(value: impl Into<String>) -> Self {
        Self::new(CursorDirection::Previous, value)
    }

    /// Returns the direction.
    pub fn direction(&self) -> CursorDirection {
        self.direction
    }

    /// Returns the boundary value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Encodes the cursor to an opaque string.
    pub fn encode(&self) -> String {
        encode_cursor(Some(self))
    }

    /// Decodes a cursor from an opaque string.
    pub fn decode(s: &str) -> PaginationResult<Self> {
        decode_cursor(s)
    }
}

impl FromStr for Cursor {
    type Err = PaginationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_cursor(s)
    }
}

/// Encodes an optional cursor into a base64 token.
///
/// Returns an empty string when `cursor` is `None`. Serialization failures are
/// logged and also yield an empty string; this function never fails.
pub fn encode_cursor(cursor: Option<&Cursor>) -> String {
    let Some(cursor) = cursor else {
        return String::new();
    };

    match serde_json::to_vec(cursor) {
        Ok(json) => STANDARD.encode(json),
        Err(e) => {
            tracing::warn!(error = %e, direction = %cursor.direction, "Failed to serialize cursor");
            String::new()
        }
    }
}

/// Decodes a base64 token back into a cursor.
///
/// The empty string is not a valid token. Callers holding an optional token must
/// handle the absent case themselves.
pub fn decode_cursor(token: &str) -> PaginationResult<Cursor> {
    let bytes = STANDARD.decode(token).map_err(|e| {
        tracing::debug!(error = %e, "Cursor is not valid base64");
        PaginationError::decode(token, e)
    })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::debug!(error = %e, "Cursor payload is malformed");
        PaginationError::decode(token, e)
    })
}

mod direction_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::CursorDirection;

    pub fn serialize<S: Serializer>(
        direction: &CursorDirection,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(direction.is_next())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<CursorDirection, D::Error> {
        bool::deserialize(deserializer).map(CursorDirection::from_flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREV_TOKEN: &str = "eyJEaXJlY3Rpb25OZXh0IjpmYWxzZSwiVmFsdWUiOiJwcmV2In0=";
    const NEXT_TOKEN: &str = "eyJEaXJlY3Rpb25OZXh0Ijp0cnVlLCJWYWx1ZSI6Im5leHQifQ==";

    #[test]
    fn test_encode_none() {
        assert_eq!(encode_cursor(None), "");
    }

    #[test]
    fn test_encode_known_tokens() {
        assert_eq!(encode_cursor(Some(&Cursor::previous("prev"))), PREV_TOKEN);
        assert_eq!(Cursor::next("next").encode(), NEXT_TOKEN);
    }

    #[test]
    fn test_decode_known_tokens() {
        assert_eq!(decode_cursor(PREV_TOKEN).unwrap(), Cursor::previous("prev"));
        assert_eq!(decode_cursor(NEXT_TOKEN).unwrap(), Cursor::next("next"));
    }

    #[test]
    fn test_decode_empty_is_error() {
        let result = decode_cursor("");
        assert!(result.unwrap_err().is_decode());
    }

    #[test]
    fn test_decode_invalid_base64() {
        let result =
            decode_cursor("X_eyJEaXJlY3Rpb25OZXh0IjpmYWxzZSwiQ3Vyc29yVmFsdWUiOiJhcHJldiJ9");
        assert!(result.unwrap_err().is_decode());
    }

    #[test]
    fn test_decode_unpadded_rejected() {
        let token = NEXT_TOKEN.trim_end_matches('=');
        assert!(decode_cursor(token).is_err());
    }

    #[test]
    fn test_decode_wrong_field_name() {
        // {"DirectionNext":false,"CursorValue":"aprev"}
        let result =
            decode_cursor("eyJEaXJlY3Rpb25OZXh0IjpmYWxzZSwiQ3Vyc29yVmFsdWUiOiJhcHJldiJ9");
        assert!(result.unwrap_err().is_decode());
    }

    #[test]
    fn test_decode_missing_direction() {
        let token = STANDARD.encode(br#"{"Value":"4"}"#);
        assert!(decode_cursor(&token).is_err());
    }

    #[test]
    fn test_decode_not_json() {
        let token = STANDARD.encode(b"not json");
        assert!(decode_cursor(&token).is_err());
    }

    #[test]
    fn test_decode_field_order_not_significant() {
        let token = STANDARD.encode(br#"{"Value":"4","DirectionNext":true}"#);
        assert_eq!(decode_cursor(&token).unwrap(), Cursor::next("4"));
    }

    #[test]
    fn test_round_trip() {
        let cursors = [
            Cursor::next(""),
            Cursor::previous("2024-01-15T10:30:00Z"),
            Cursor::next("värde \"quoted\" / slashes"),
        ];

        for cursor in cursors {
            assert_eq!(Cursor::decode(&cursor.encode()).unwrap(), cursor);
        }
    }

    #[test]
    fn test_from_str() {
        let cursor: Cursor = NEXT_TOKEN.parse().unwrap();
        assert_eq!(cursor.direction(), CursorDirection::Next);
        assert_eq!(cursor.value(), "next");
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(CursorDirection::Next.to_string(), "next");
        assert_eq!(CursorDirection::Previous.to_string(), "previous");
        assert_eq!(CursorDirection::default(), CursorDirection::Next);
    }
}
