//! Attribute values and key normalization.
//!
//! Raw keys arrive the way callers can spell them as identifiers
//! (`data_test`, `aria_label`, `cls_`, `type_`) and are mapped to canonical
//! attribute names before they are stored on an element.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// Map of canonical attribute names to values for an element.
///
/// Insertion order is irrelevant; the renderer always recomputes the order.
pub type AttributesMap = HashMap<String, AttrValue>;

/// Canonical key for the class attribute.
const CLASS: &str = "class";

/// Normalized form of the `cls`/`cls_` alias.
const CLS_ALIAS: &str = "cls";

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Presence flag: `true` renders as a bare key, `false` drops the attribute.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Free-form text.
    Str(String),
    /// Ordered scalars, rendered space-joined.
    List(Vec<AttrValue>),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write_float(f, *v),
            Self::Str(s) => f.write_str(s),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for AttrValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<usize> for AttrValue {
    fn from(v: usize) -> Self {
        i64::try_from(v).map_or_else(|_| Self::Str(v.to_string()), Self::Int)
    }
}

impl From<f32> for AttrValue {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&String> for AttrValue {
    fn from(v: &String) -> Self {
        Self::Str(v.clone())
    }
}

impl<T: Into<Self>> From<Vec<T>> for AttrValue {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>, const N: usize> From<[T; N]> for AttrValue {
    fn from(v: [T; N]) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

/// Build raw attribute pairs from `key = value` items, keeping caller order.
///
/// Keys keep their identifier spelling (`cls_`, `data_test`, `type_`) so the
/// normalizer sees exactly what was written.
///
/// ```ignore
/// let raw = attrs![cls = "main", data_count = 42, hidden = true];
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        ::std::vec::Vec::<(&'static str, $crate::AttrValue)>::new()
    };
    ($($key:ident = $value:expr),+ $(,)?) => {
        ::std::vec![$((::std::stringify!($key), $crate::AttrValue::from($value))),+]
    };
}

/// Normalize a single raw key: strip trailing underscores, then turn the
/// remaining underscores into hyphens.
pub fn normalize_key(raw: &str) -> String {
    raw.trim_end_matches('_').replace('_', "-")
}

/// Map raw key/value pairs onto a canonical [`AttributesMap`].
///
/// `cls`/`cls_` target `class` and always win over `class`/`class_`,
/// whatever order they were supplied in. For any other key the last value
/// supplied wins.
pub fn normalize_attributes<K, V, I>(raw: I) -> AttributesMap
where
    K: AsRef<str>,
    V: Into<AttrValue>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut attrs = AttributesMap::new();
    let mut class_fallback = None;
    let mut has_cls = false;

    for (key, value) in raw {
        let key = normalize_key(key.as_ref());
        match key.as_str() {
            CLS_ALIAS => {
                has_cls = true;
                let _ = attrs.insert(CLASS.to_string(), value.into());
            }
            CLASS => class_fallback = Some(value.into()),
            _ => {
                let _ = attrs.insert(key, value.into());
            }
        }
    }

    if !has_cls {
        if let Some(value) = class_fallback {
            let _ = attrs.insert(CLASS.to_string(), value);
        }
    }
    attrs
}

/// Shortest round-trip digits. Positional notation keeps a fractional
/// digit (`2.0`); exponents from 16 up or below -4 switch to `1e+16` form.
fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("nan");
    }
    if v.is_infinite() {
        return f.write_str(if v > 0.0 { "inf" } else { "-inf" });
    }

    let scientific = format!("{v:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return write!(f, "{mantissa}e{sign}{:02}", exponent.unsigned_abs());
    }

    let plain = v.to_string();
    if plain.contains('.') {
        f.write_str(&plain)
    } else {
        write!(f, "{plain}.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("data_test"), "data-test");
        assert_eq!(normalize_key("my_attr_name"), "my-attr-name");
        assert_eq!(normalize_key("type_"), "type");
        assert_eq!(normalize_key("cls__"), "cls");
        assert_eq!(normalize_key("href"), "href");
    }

    #[test]
    fn test_cls_beats_class_in_either_order() {
        let a = normalize_attributes(attrs![cls_ = "main", class_ = "ignored"]);
        let b = normalize_attributes(attrs![class_ = "ignored", cls_ = "main"]);
        assert_eq!(a.get("class"), Some(&AttrValue::from("main")));
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_class_alias_applies_without_cls() {
        let attrs = normalize_attributes(attrs![class_ = "only"]);
        assert_eq!(attrs.get("class"), Some(&AttrValue::from("only")));
        assert!(!attrs.contains_key("cls"));
    }

    #[test]
    fn test_last_duplicate_wins() {
        let attrs = normalize_attributes([("data_x", "1"), ("data-x", "2")]);
        assert_eq!(attrs.get("data-x"), Some(&AttrValue::from("2")));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(AttrValue::from(true).to_string(), "True");
        assert_eq!(AttrValue::from(false).to_string(), "False");
        assert_eq!(AttrValue::from(42).to_string(), "42");
        assert_eq!(AttrValue::from(1.5).to_string(), "1.5");
        assert_eq!(AttrValue::from(2.0).to_string(), "2.0");
        assert_eq!(AttrValue::from(-0.0).to_string(), "-0.0");
        assert_eq!(AttrValue::from(["a", "b"]).to_string(), "a b");
        assert_eq!(AttrValue::from(vec![1, 2, 3]).to_string(), "1 2 3");
    }

    #[test]
    fn test_float_magnitudes() {
        let shown = |v: f64| AttrValue::from(v).to_string();
        assert_eq!(shown(1e15), "1000000000000000.0");
        assert_eq!(shown(1e16), "1e+16");
        assert_eq!(shown(-2.5e100), "-2.5e+100");
        assert_eq!(shown(1e-4), "0.0001");
        assert_eq!(shown(1.5e-5), "1.5e-05");
        assert_eq!(shown(123.456), "123.456");
        assert_eq!(shown(f64::NAN), "nan");
        assert_eq!(shown(f64::INFINITY), "inf");
        assert_eq!(shown(f64::NEG_INFINITY), "-inf");
    }
}
