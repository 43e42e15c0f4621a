use chrono::{DateTime, FixedOffset};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::PropertyValue;

/// Name → value mapping of a record's dynamic properties.
///
/// Insertion order is preserved; replacing an existing property keeps its
/// position. Records carry a handful of properties, so lookups are linear.
///
/// Serialized as a map in insertion order. Repeated names in serialized input
/// collapse into one entry, the same way [`PropertyBag::insert`] does.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBag {
    entries: Vec<(String, PropertyValue)>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(key, _)| key == name)
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.position(name).map(|idx| &self.entries[idx].1)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Stores `value` under `name`, returning the value it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<PropertyValue> {
        self.position(name).map(|idx| self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    // ========================================
    // Typed get-with-default accessors
    //
    // A present property always wins over the default, even when it is
    // stored as null or as a different kind (both read as `None`).
    // ========================================

    pub fn get_string_value(&self, name: &str, default: Option<&str>) -> Option<String> {
        match self.get(name) {
            Some(value) => value.as_str().map(str::to_string),
            None => default.map(str::to_string),
        }
    }

    pub fn get_int_value(&self, name: &str, default: Option<i32>) -> Option<i32> {
        match self.get(name) {
            Some(value) => value.as_i32(),
            None => default,
        }
    }

    pub fn get_datetime_value(
        &self,
        name: &str,
        default: Option<DateTime<FixedOffset>>,
    ) -> Option<DateTime<FixedOffset>> {
        match self.get(name) {
            Some(value) => value.as_datetime_offset(),
            None => default,
        }
    }

    pub fn get_boolean_value(&self, name: &str, default: Option<bool>) -> Option<bool> {
        match self.get(name) {
            Some(value) => value.as_bool(),
            None => default,
        }
    }
}

impl<K, V> FromIterator<(K, V)> for PropertyBag
where
    K: Into<String>,
    V: Into<PropertyValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = Self::new();
        for (name, value) in iter {
            bag.insert(name, value);
        }
        bag
    }
}

impl IntoIterator for PropertyBag {
    type Item = (String, PropertyValue);
    type IntoIter = std::vec::IntoIter<(String, PropertyValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for PropertyBag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct PropertyBagVisitor;

impl<'de> Visitor<'de> for PropertyBagVisitor {
    type Value = PropertyBag;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a map of property names to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<PropertyBag, A::Error> {
        let mut bag = PropertyBag::new();
        while let Some((name, value)) = access.next_entry::<String, PropertyValue>()? {
            bag.insert(name, value);
        }
        Ok(bag)
    }
}

impl<'de> Deserialize<'de> for PropertyBag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(PropertyBagVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_insert_preserves_order_and_position() {
        let mut bag = PropertyBag::new();
        bag.insert("b", 1);
        bag.insert("a", 2);
        bag.insert("c", 3);
        let replaced = bag.insert("a", 20);

        assert_eq!(replaced, Some(PropertyValue::Int32(2)));
        assert_eq!(bag.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(bag.get("a"), Some(&PropertyValue::Int32(20)));
    }

    #[test]
    fn test_remove() {
        let mut bag: PropertyBag = [("x", 1), ("y", 2)].into_iter().collect();
        assert_eq!(bag.remove("x"), Some(PropertyValue::Int32(1)));
        assert_eq!(bag.remove("x"), None);
        assert_eq!(bag.len(), 1);
    }

    #[test]
    fn test_absent_property_falls_back_to_default() {
        let bag = PropertyBag::new();
        assert_eq!(bag.get_int_value("GracePeriodMinutes", Some(5)), Some(5));
        assert_eq!(bag.get_int_value("MaxItems", None), None);
        assert_eq!(bag.get_boolean_value("IsActive", Some(true)), Some(true));
        assert_eq!(bag.get_string_value("Name", Some("n/a")), Some("n/a".into()));
        assert_eq!(bag.get_datetime_value("LastScheduled", None), None);
    }

    #[test]
    fn test_present_property_overrides_default() {
        let when = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let mut bag = PropertyBag::new();
        bag.insert("GracePeriodMinutes", 15);
        bag.insert("IsActive", false);
        bag.insert("LastScheduled", when);

        assert_eq!(bag.get_int_value("GracePeriodMinutes", Some(5)), Some(15));
        assert_eq!(bag.get_boolean_value("IsActive", Some(true)), Some(false));
        assert_eq!(bag.get_datetime_value("LastScheduled", None), Some(when.fixed_offset()));
    }

    #[test]
    fn test_present_null_does_not_take_default() {
        let mut bag = PropertyBag::new();
        bag.insert("GracePeriodMinutes", PropertyValue::Null);
        bag.insert("IsActive", "yes");

        assert_eq!(bag.get_int_value("GracePeriodMinutes", Some(5)), None);
        assert_eq!(bag.get_boolean_value("IsActive", Some(true)), None);
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let bag: PropertyBag = [("z", 1), ("a", 2)].into_iter().collect();
        let json = serde_json::to_string(&bag).unwrap();
        assert_eq!(json, r#"{"z":{"Int32":1},"a":{"Int32":2}}"#);

        let back: PropertyBag = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bag);
    }

    #[test]
    fn test_repeated_names_collapse_on_deserialize() {
        let json = r#"{"IsActive":{"Boolean":true},"Other":{"Int32":1},"IsActive":{"Boolean":false}}"#;
        let bag: PropertyBag = serde_json::from_str(json).unwrap();

        assert_eq!(bag.len(), 2);
        assert_eq!(bag.keys().collect::<Vec<_>>(), vec!["IsActive", "Other"]);
        assert_eq!(bag.get_boolean_value("IsActive", None), Some(false));
    }
}
