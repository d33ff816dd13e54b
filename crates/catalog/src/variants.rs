//! Variant combinations (dimension name -> selected value).

use core::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

/// Ordered mapping of variant dimension to its selected value.
///
/// Order is the document order of the payload (e.g. `color` before `size`),
/// which is the order display names are built in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variants(Vec<(String, String)>);

impl Variants {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Set a dimension, replacing its value in place when already present.
    pub fn insert(&mut self, dimension: impl Into<String>, value: impl Into<String>) {
        let dimension = dimension.into();
        let value = value.into();
        match self.0.iter_mut().find(|(d, _)| *d == dimension) {
            Some(entry) => entry.1 = value,
            None => self.0.push((dimension, value)),
        }
    }

    pub fn get(&self, dimension: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(d, _)| d == dimension)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(d, v)| (d.as_str(), v.as_str()))
    }

    /// Selected values in dimension order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(_, v)| v.as_str())
    }
}

impl<K, V> FromIterator<(K, V)> for Variants
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut variants = Variants::new();
        for (k, v) in iter {
            variants.insert(k, v);
        }
        variants
    }
}

impl Serialize for Variants {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (dimension, value) in &self.0 {
            map.serialize_entry(dimension, value)?;
        }
        map.end()
    }
}

struct VariantsVisitor;

impl<'de> Visitor<'de> for VariantsVisitor {
    type Value = Variants;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of variant dimension to value")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut variants = Variants::new();
        while let Some((dimension, value)) = access.next_entry::<String, JsonValue>()? {
            // Non-string values (sizes like 42) render the way they are written.
            let value = match value {
                JsonValue::String(s) => s,
                JsonValue::Null => String::new(),
                other => other.to_string(),
            };
            variants.insert(dimension, value);
        }
        Ok(variants)
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(Variants::new())
    }
}

impl<'de> Deserialize<'de> for Variants {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(VariantsVisitor)
    }
}
