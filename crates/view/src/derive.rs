//! Display values derived per row at render time.
//!
//! Unset and zero are deliberately treated alike: a price or stock of `0`
//! renders as the placeholder, the same as a missing one.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::row::Row;

const VARIANT_SEPARATOR: &str = " / ";
const PLACEHOLDER: &str = "-";

/// A displayed value or the `-` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell<T> {
    Value(T),
    Placeholder,
}

impl<T> Cell<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Cell::Value(v) => Some(v),
            Cell::Placeholder => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Cell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Value(v) => v.fmt(f),
            Cell::Placeholder => f.write_str(PLACEHOLDER),
        }
    }
}

/// Two-state published tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublishedTag {
    On,
    Off,
}

impl PublishedTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishedTag::On => "On",
            PublishedTag::Off => "Off",
        }
    }
}

impl From<bool> for PublishedTag {
    fn from(published: bool) -> Self {
        if published {
            PublishedTag::On
        } else {
            PublishedTag::Off
        }
    }
}

impl fmt::Display for PublishedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row name, or the variant values joined with `" / "` when unnamed.
pub fn display_name(row: &Row) -> String {
    match row.name() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => row
            .variants()
            .map(|v| v.values().collect::<Vec<_>>().join(VARIANT_SEPARATOR))
            .unwrap_or_default(),
    }
}

pub fn display_price(row: &Row) -> Cell<f64> {
    match row.price() {
        Some(price) if price != 0.0 && !price.is_nan() => Cell::Value(price),
        _ => Cell::Placeholder,
    }
}

/// Leaf rows show their own stock; parent rows show the sum over children.
///
/// A child without stock contributes 0 and the sum saturates at the `i64`
/// bounds. Parent sums are never replaced by the placeholder, even when they
/// come to 0.
pub fn display_stock(row: &Row) -> Cell<i64> {
    if row.is_parent() {
        let total = row
            .children()
            .iter()
            .map(|child| child.stock().unwrap_or(0))
            .fold(0i64, i64::saturating_add);
        return Cell::Value(total);
    }
    match row.stock() {
        Some(stock) if stock != 0 => Cell::Value(stock),
        _ => Cell::Placeholder,
    }
}

pub fn published_tag(row: &Row) -> PublishedTag {
    PublishedTag::from(row.published())
}

/// 1-based ordinal label for the `No.` column (`"1."`, `"2."`, ...).
pub fn ordinal_label(index: usize) -> String {
    format!("{}.", index + 1)
}
