use crate::json::JsonValue;

/// A key/value pair of a distributed map, handed to comparators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    key: i64,
    value: JsonValue,
}

impl MapEntry {
    pub fn new(key: i64, value: impl Into<JsonValue>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }

    #[inline]
    pub fn key(&self) -> i64 {
        self.key
    }

    #[inline]
    pub fn value(&self) -> &JsonValue {
        &self.value
    }
}

impl From<(i64, JsonValue)> for MapEntry {
    fn from((key, value): (i64, JsonValue)) -> Self {
        Self { key, value }
    }
}
