//! Boundary value extraction.
//!
//! The page builder needs the value of one named field off arbitrary records. Records
//! are inspected through their `serde` representation, so any `Serialize` type with a
//! struct-like shape works without the paginator knowing its fields at compile time.
//! Only the requested field is converted; sibling fields are skipped unseen.
//!
//! The string form of the value is what ends up inside cursors and what the
//! data-fetch layer compares against on the next request. It must therefore match
//! whatever comparison that layer performs: `"10" < "9"` as strings even though
//! `10 > 9` as numbers. Choosing a sortable boundary field is up to the caller.

use std::fmt::Display;

use serde::Serialize;
use serde::ser::{self, Impossible, SerializeMap, SerializeStruct, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::error::{PaginationError, PaginationResult};

/// Reads the named field off `record` and returns its natural string form.
///
/// The field name is the serialized name, so `#[serde(rename)]` attributes apply.
/// Values are rendered as:
/// - strings: the raw string (timestamps keep their serialized RFC 3339 text)
/// - integers: their decimal form
/// - floats: the shortest `f64` form, so `1.0` reads `1`
/// - booleans: `true` or `false`
/// - null: the empty string
/// - arrays and objects: compact JSON
///
/// # Errors
///
/// Returns [`PaginationError::FieldNotFound`] when the field does not exist, the
/// record does not serialize as a struct or map, or the field's own value cannot be
/// represented as JSON.
pub fn boundary_value<T: Serialize + ?Sized>(record: &T, field: &str) -> PaginationResult<String> {
    match record.serialize(FieldCapture { field }) {
        Ok(Some(value)) => Ok(natural_string(value)),
        Ok(None) => Err(PaginationError::field_not_found(field)),
        Err(e) => {
            tracing::debug!(error = %e, field, "Record could not be inspected");
            Err(PaginationError::field_not_found(field))
        }
    }
}

/// Renders a JSON value the way it would read in a query predicate.
pub fn natural_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

#[derive(Debug, Error)]
enum CaptureError {
    #[error("record is not struct-like")]
    NotStructLike,

    #[error("field value is not representable: {0}")]
    Value(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

impl ser::Error for CaptureError {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}

/// Serializer that keeps the value of one named entry of a struct or map.
struct FieldCapture<'a> {
    field: &'a str,
}

macro_rules! reject {
    ($($method:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method(self, _: $ty) -> Result<Self::Ok, Self::Error> {
                Err(CaptureError::NotStructLike)
            }
        )*
    };
}

impl<'a> Serializer for FieldCapture<'a> {
    type Ok = Option<Value>;
    type Error = CaptureError;
    type SerializeSeq = Impossible<Self::Ok, Self::Error>;
    type SerializeTuple = Impossible<Self::Ok, Self::Error>;
    type SerializeTupleStruct = Impossible<Self::Ok, Self::Error>;
    type SerializeTupleVariant = Impossible<Self::Ok, Self::Error>;
    type SerializeMap = CaptureMap<'a>;
    type SerializeStruct = CaptureStruct<'a>;
    type SerializeStructVariant = Impossible<Self::Ok, Self::Error>;

    reject! {
        serialize_bool(bool),
        serialize_i8(i8),
        serialize_i16(i16),
        serialize_i32(i32),
        serialize_i64(i64),
        serialize_u8(u8),
        serialize_u16(u16),
        serialize_u32(u32),
        serialize_u64(u64),
        serialize_f32(f32),
        serialize_f64(f64),
        serialize_char(char),
        serialize_str(&str),
        serialize_bytes(&[u8]),
        serialize_unit_struct(&'static str),
    }

    fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
        Err(CaptureError::NotStructLike)
    }

    fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
        Err(CaptureError::NotStructLike)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
    ) -> Result<Self::Ok, Self::Error> {
        Err(CaptureError::NotStructLike)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        Err(CaptureError::NotStructLike)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        Err(CaptureError::NotStructLike)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        Err(CaptureError::NotStructLike)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, Self::Error> {
        Err(CaptureError::NotStructLike)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Self::Error> {
        Err(CaptureError::NotStructLike)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Ok(CaptureMap {
            field: self.field,
            matched: false,
            found: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, Self::Error> {
        Ok(CaptureStruct {
            field: self.field,
            found: None,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Self::Error> {
        Err(CaptureError::NotStructLike)
    }
}

struct CaptureStruct<'a> {
    field: &'a str,
    found: Option<Value>,
}

impl SerializeStruct for CaptureStruct<'_> {
    type Ok = Option<Value>;
    type Error = CaptureError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        if self.found.is_none() && key == self.field {
            self.found = Some(serde_json::to_value(value)?);
        }
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(self.found)
    }
}

struct CaptureMap<'a> {
    field: &'a str,
    matched: bool,
    found: Option<Value>,
}

impl SerializeMap for CaptureMap<'_> {
    type Ok = Option<Value>;
    type Error = CaptureError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), Self::Error> {
        // Keys that are not strings can never name the field
        self.matched = self.found.is_none()
            && matches!(serde_json::to_value(key), Ok(Value::String(k)) if k == self.field);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        if self.matched {
            self.found = Some(serde_json::to_value(value)?);
            self.matched = false;
        }
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(self.found)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;

    #[derive(Serialize)]
    struct Book {
        #[serde(rename = "ID")]
        id: i64,
        title: String,
        is_activated: bool,
        created_at: chrono::DateTime<Utc>,
        rating: Option<f64>,
    }

    fn book() -> Book {
        Book {
            id: 1,
            title: "title".to_string(),
            is_activated: true,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
            rating: None,
        }
    }

    #[test]
    fn test_integer_field() {
        assert_eq!(boundary_value(&book(), "ID").unwrap(), "1");
    }

    #[test]
    fn test_string_field() {
        assert_eq!(boundary_value(&book(), "title").unwrap(), "title");
    }

    #[test]
    fn test_boolean_field() {
        assert_eq!(boundary_value(&book(), "is_activated").unwrap(), "true");
    }

    #[test]
    fn test_time_field() {
        assert_eq!(
            boundary_value(&book(), "created_at").unwrap(),
            "2024-01-15T10:30:00Z"
        );
    }

    #[test]
    fn test_null_field() {
        assert_eq!(boundary_value(&book(), "rating").unwrap(), "");
    }

    #[test]
    fn test_missing_field() {
        let err = boundary_value(&book(), "FieldDoesNotExist").unwrap_err();
        assert_eq!(
            err,
            PaginationError::FieldNotFound {
                field: "FieldDoesNotExist".to_string()
            }
        );
    }

    #[test]
    fn test_serde_name_is_used() {
        assert!(boundary_value(&book(), "id").is_err());
    }

    #[test]
    fn test_not_struct_like() {
        assert!(boundary_value(&42, "ID").is_err());
        assert!(boundary_value(&vec![1, 2, 3], "ID").is_err());
        assert!(boundary_value("plain", "ID").is_err());
    }

    #[test]
    fn test_json_records() {
        let record = json!({"id": 7, "score": 2.5, "tags": ["a", "b"]});
        assert_eq!(boundary_value(&record, "id").unwrap(), "7");
        assert_eq!(boundary_value(&record, "score").unwrap(), "2.5");
        assert_eq!(boundary_value(&record, "tags").unwrap(), r#"["a","b"]"#);
    }

    #[test]
    fn test_float_field_uses_shortest_form() {
        let record = json!({"score": 1.0, "ratio": 0.25});
        assert_eq!(boundary_value(&record, "score").unwrap(), "1");
        assert_eq!(boundary_value(&record, "ratio").unwrap(), "0.25");
    }

    #[derive(Serialize)]
    struct Row {
        #[serde(rename = "ID")]
        id: u32,
        big: u128,
        tagged: HashMap<(u8, u8), u8>,
    }

    fn row() -> Row {
        Row {
            id: 4,
            big: u128::MAX,
            tagged: HashMap::from([((1, 2), 3)]),
        }
    }

    #[test]
    fn test_unrepresentable_sibling_fields_are_skipped() {
        assert_eq!(boundary_value(&row(), "ID").unwrap(), "4");
    }

    #[test]
    fn test_unrepresentable_field_itself() {
        assert!(boundary_value(&row(), "big").unwrap_err().is_field_not_found());
        assert!(boundary_value(&row(), "tagged").is_err());
    }

    #[test]
    fn test_map_records() {
        let record = BTreeMap::from([("id", 3), ("rank", 9)]);
        assert_eq!(boundary_value(&record, "rank").unwrap(), "9");
        assert!(boundary_value(&record, "missing").is_err());

        let keyed = HashMap::from([((1u8, 2u8), "x")]);
        assert!(boundary_value(&keyed, "id").is_err());
    }

    #[test]
    fn test_newtype_and_option_wrappers() {
        #[derive(Serialize)]
        struct Wrapped(Book);

        assert_eq!(boundary_value(&Wrapped(book()), "ID").unwrap(), "1");
        assert_eq!(boundary_value(&Some(book()), "title").unwrap(), "title");
        assert!(boundary_value(&None::<Book>, "ID").is_err());
    }
}
