use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

/// A single stored property of a diagnostics source record.
///
/// Mirrors the typed-value kinds the record store understands. Timestamps
/// are kept the way the store keeps them: as a UTC instant with no offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Null,
    Text(String),
    Int32(i32),
    Int64(i64),
    Double(f64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    Guid(Uuid),
    Binary(Vec<u8>),
    Object(JsonValue),
}

impl PropertyValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Text(_) => "Edm.String",
            Self::Int32(_) => "Edm.Int32",
            Self::Int64(_) => "Edm.Int64",
            Self::Double(_) => "Edm.Double",
            Self::Boolean(_) => "Edm.Boolean",
            Self::DateTime(_) => "Edm.DateTime",
            Self::Guid(_) => "Edm.Guid",
            Self::Binary(_) => "Edm.Binary",
            Self::Object(_) => "Object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Reinterprets a stored UTC timestamp as a timestamp with a zero offset.
    pub fn as_datetime_offset(&self) -> Option<DateTime<FixedOffset>> {
        self.as_datetime().map(|dt| dt.fixed_offset())
    }

    pub fn as_guid(&self) -> Option<Uuid> {
        match self {
            Self::Guid(u) => Some(*u),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Binary(b) => Some(b),
            _ => None,
        }
    }

    /// Untyped projection used when handing the value to consumers that do not
    /// know the record schema.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Text(s) => JsonValue::String(s.clone()),
            Self::Int32(i) => JsonValue::from(*i),
            Self::Int64(i) => JsonValue::from(*i),
            Self::Double(f) => JsonValue::from(*f),
            Self::Boolean(b) => JsonValue::Bool(*b),
            Self::DateTime(dt) => JsonValue::String(dt.to_rfc3339()),
            Self::Guid(u) => JsonValue::String(u.to_string()),
            Self::Binary(b) => JsonValue::from(b.clone()),
            Self::Object(v) => v.clone(),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Text(s) => write!(f, "{}", s),
            Self::Int32(i) => write!(f, "{}", i),
            Self::Int64(i) => write!(f, "{}", i),
            Self::Double(d) => write!(f, "{}", d),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Guid(u) => write!(f, "{}", u),
            Self::Binary(b) => write!(f, "<{} bytes>", b.len()),
            Self::Object(v) => write!(f, "{}", v),
        }
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        Self::Int32(i)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        Self::Int64(i)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        Self::Double(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<DateTime<Utc>> for PropertyValue {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }
}

// The store has no offset-aware kind; the instant is kept, the offset is not.
impl From<DateTime<FixedOffset>> for PropertyValue {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::DateTime(dt.with_timezone(&Utc))
    }
}

impl From<Uuid> for PropertyValue {
    fn from(u: Uuid) -> Self {
        Self::Guid(u)
    }
}

impl From<Vec<u8>> for PropertyValue {
    fn from(b: Vec<u8>) -> Self {
        Self::Binary(b)
    }
}

impl From<JsonValue> for PropertyValue {
    fn from(v: JsonValue) -> Self {
        Self::Object(v)
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Conversion from a stored value into a requested Rust type.
///
/// Returns `None` when the stored kind cannot represent `Self`. Callers
/// decide whether that is an error; the typed view treats it as one.
pub trait FromProperty: Sized {
    const TYPE_NAME: &'static str;

    fn from_property(value: &PropertyValue) -> Option<Self>;
}

macro_rules! impl_from_property {
    ($ty:ty, $name:literal, $accessor:ident) => {
        impl FromProperty for $ty {
            const TYPE_NAME: &'static str = $name;

            fn from_property(value: &PropertyValue) -> Option<Self> {
                value.$accessor()
            }
        }
    };
}

impl_from_property!(i32, "Int32", as_i32);
impl_from_property!(i64, "Int64", as_i64);
impl_from_property!(f64, "Double", as_f64);
impl_from_property!(bool, "Boolean", as_bool);
impl_from_property!(DateTime<Utc>, "DateTime", as_datetime);
impl_from_property!(DateTime<FixedOffset>, "DateTimeOffset", as_datetime_offset);
impl_from_property!(Uuid, "Guid", as_guid);

impl FromProperty for String {
    const TYPE_NAME: &'static str = "String";

    fn from_property(value: &PropertyValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromProperty for Vec<u8> {
    const TYPE_NAME: &'static str = "Binary";

    fn from_property(value: &PropertyValue) -> Option<Self> {
        value.as_bytes().map(<[u8]>::to_vec)
    }
}

// Any stored kind has an untyped projection.
impl FromProperty for JsonValue {
    const TYPE_NAME: &'static str = "Object";

    fn from_property(value: &PropertyValue) -> Option<Self> {
        Some(value.to_json())
    }
}

impl FromProperty for PropertyValue {
    const TYPE_NAME: &'static str = "PropertyValue";

    fn from_property(value: &PropertyValue) -> Option<Self> {
        Some(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_accessors_do_not_coerce() {
        let value = PropertyValue::Int32(42);
        assert_eq!(value.as_i32(), Some(42));
        assert_eq!(value.as_i64(), None);
        assert_eq!(value.as_str(), None);
        assert_eq!(PropertyValue::Text("42".into()).as_i32(), None);
    }

    #[test]
    fn test_datetime_reads_as_zero_offset() {
        let utc = Utc.with_ymd_and_hms(2024, 1, 1, 10, 30, 0).unwrap();
        let value = PropertyValue::DateTime(utc);

        let offset = value.as_datetime_offset().unwrap();
        assert_eq!(offset.offset().local_minus_utc(), 0);
        assert_eq!(offset, utc);
    }

    #[test]
    fn test_offset_datetime_stored_as_utc_instant() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = plus_two.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

        let value = PropertyValue::from(local);
        assert_eq!(
            value.as_datetime(),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_option_none_becomes_null() {
        assert!(PropertyValue::from(None::<String>).is_null());
        assert_eq!(PropertyValue::from(Some("x")), PropertyValue::Text("x".into()));
    }

    #[test]
    fn test_json_projection_is_total() {
        assert_eq!(
            JsonValue::from_property(&PropertyValue::Int64(7)),
            Some(JsonValue::from(7))
        );
        assert_eq!(
            JsonValue::from_property(&PropertyValue::Null),
            Some(JsonValue::Null)
        );
    }

    #[test]
    fn test_type_names() {
        assert_eq!(PropertyValue::Text("a".into()).type_name(), "Edm.String");
        assert_eq!(PropertyValue::Boolean(true).type_name(), "Edm.Boolean");
        assert_eq!(PropertyValue::Null.type_name(), "Null");
    }
}
