//! Catalog records
//!
//! Product data arrives from scrapers and spreadsheet imports with no
//! agreed schema, so attributes are kept as a weakly-typed tree and read
//! through lossy views. A view returning `None` means "unknown", never
//! "incompatible".

use crate::error::{Result, RigsmithError};
use crate::types::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute value as found in catalog data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Explicit null
    Null,
    /// Boolean flag
    Boolean(bool),
    /// Whole number
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// Free text, possibly with units ("320 mm", "750W")
    String(String),
    /// List of values
    Array(Vec<AttrValue>),
    /// Nested object
    Object(BTreeMap<String, AttrValue>),
}

impl AttrValue {
    /// Build an object value from key/value pairs
    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<AttrValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        AttrValue::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Check if value is null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    /// Textual view; numbers are rendered, blank strings are `None`
    pub fn as_text(&self) -> Option<String> {
        match self {
            AttrValue::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            AttrValue::Integer(i) => Some(i.to_string()),
            AttrValue::Float(f) if f.is_finite() => Some(if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }),
            _ => None,
        }
    }

    /// Numeric view; strings are read up to the first non-numeric character
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Integer(i) => Some(*i as f64),
            AttrValue::Float(f) => f.is_finite().then_some(*f),
            AttrValue::String(s) => leading_number(s),
            _ => None,
        }
    }

    /// Numeric view that drops every non-digit character of a string ("1,000 W" -> 1000)
    pub fn as_digits(&self) -> Option<f64> {
        match self {
            AttrValue::String(s) => {
                let digits: String = s.chars().filter(char::is_ascii_digit).collect();
                digits.parse::<u64>().ok().map(|n| n as f64)
            }
            other => other.as_number(),
        }
    }

    /// List-of-text view; comma separated strings are split
    pub fn as_text_list(&self) -> Option<Vec<String>> {
        match self {
            AttrValue::Array(items) => Some(items.iter().filter_map(AttrValue::as_text).collect()),
            AttrValue::String(s) => Some(
                s.split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Every numeric leaf of an object or array (`{front: 360, top: "240mm"}` -> [360, 240])
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        match self {
            AttrValue::Object(map) => Some(map.values().filter_map(AttrValue::as_number).collect()),
            AttrValue::Array(items) => Some(items.iter().filter_map(AttrValue::as_number).collect()),
            _ => None,
        }
    }

    /// Loose truthiness as used by catalog flags
    pub fn is_truthy(&self) -> bool {
        match self {
            AttrValue::Null => false,
            AttrValue::Boolean(b) => *b,
            AttrValue::Integer(i) => *i != 0,
            AttrValue::Float(f) => *f != 0.0 && !f.is_nan(),
            AttrValue::String(s) => !s.is_empty(),
            AttrValue::Array(_) | AttrValue::Object(_) => true,
        }
    }
}

fn leading_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map_or(trimmed.len(), |(i, _)| i);
    trimmed[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::String(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::String(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Boolean(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Integer(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Integer(i64::from(value))
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        AttrValue::Integer(i64::from(value))
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl<T: Into<AttrValue>> From<Vec<T>> for AttrValue {
    fn from(values: Vec<T>) -> Self {
        AttrValue::Array(values.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for AttrValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => AttrValue::Null,
            serde_json::Value::Bool(b) => AttrValue::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    AttrValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    AttrValue::Float(f)
                } else {
                    AttrValue::String(n.to_string())
                }
            }
            serde_json::Value::String(s) => AttrValue::String(s),
            serde_json::Value::Array(arr) => {
                AttrValue::Array(arr.into_iter().map(AttrValue::from).collect())
            }
            serde_json::Value::Object(obj) => {
                AttrValue::Object(obj.into_iter().map(|(k, v)| (k, AttrValue::from(v))).collect())
            }
        }
    }
}

/// A catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Catalog identifier
    pub id: String,
    /// Declared category, if the source recorded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Display name
    pub name: String,
    /// List price
    #[serde(default)]
    pub price: f64,
    /// Lowest observed price across retailers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lowest_price: Option<f64>,
    /// Free-form spec lines ("PCIe 5.0 x16", ...)
    #[serde(default)]
    pub specs: Vec<String>,
    /// Category-specific attribute bag
    #[serde(default)]
    pub attributes: BTreeMap<String, AttrValue>,
}

impl Component {
    /// Create a component with no attributes
    pub fn new(
        id: impl Into<String>,
        category: Category,
        name: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            category: Some(category),
            name: name.into(),
            price,
            lowest_price: None,
            specs: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// Set the lowest observed price
    #[must_use]
    pub fn with_lowest_price(mut self, lowest_price: f64) -> Self {
        self.lowest_price = Some(lowest_price);
        self
    }

    /// Add an attribute
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Add a spec line
    #[must_use]
    pub fn with_spec(mut self, spec: impl Into<String>) -> Self {
        self.specs.push(spec.into());
        self
    }

    /// Price used for budgeting: `lowest_price` when it is a usable amount, else `price`
    pub fn effective_price(&self) -> f64 {
        match self.lowest_price {
            Some(lowest) if lowest.is_finite() && lowest > 0.0 => lowest,
            _ => self.price,
        }
    }
}

/// Purchasable options grouped by category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    components: BTreeMap<Category, Vec<Component>>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component under its declared category
    pub fn insert(&mut self, component: Component) -> Result<()> {
        let category = component.category.ok_or_else(|| {
            RigsmithError::invalid_input(format!(
                "component '{}' has no category; use set_options",
                component.id
            ))
        })?;
        self.components.entry(category).or_default().push(component);
        Ok(())
    }

    /// Replace the options of one category
    pub fn set_options(&mut self, category: Category, options: Vec<Component>) {
        self.components.insert(category, options);
    }

    /// Builder-style variant of [`Catalog::set_options`]
    #[must_use]
    pub fn with_options(mut self, category: Category, options: Vec<Component>) -> Self {
        self.set_options(category, options);
        self
    }

    /// Options for a category; empty when the category is absent
    pub fn options(&self, category: Category) -> &[Component] {
        self.components.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of components
    pub fn len(&self) -> usize {
        self.components.values().map(Vec::len).sum()
    }

    /// Check if the catalog has no components
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case(AttrValue::from(320), Some(320.0))]
    #[test_case(AttrValue::from("320 mm"), Some(320.0))]
    #[test_case(AttrValue::from("  12.5cm"), Some(12.5))]
    #[test_case(AttrValue::from("n/a"), None)]
    #[test_case(AttrValue::Float(f64::NAN), None)]
    #[test_case(AttrValue::from(true), None)]
    fn test_as_number(value: AttrValue, expected: Option<f64>) {
        assert_eq!(value.as_number(), expected);
    }

    #[test]
    fn test_as_digits_strips_units() {
        assert_eq!(AttrValue::from("1,000 W").as_digits(), Some(1000.0));
        assert_eq!(AttrValue::from("360mm").as_digits(), Some(360.0));
        assert_eq!(AttrValue::from("W").as_digits(), None);
        assert_eq!(AttrValue::from(650).as_digits(), Some(650.0));
    }

    #[test]
    fn test_text_views() {
        assert_eq!(AttrValue::from(" AM5 ").as_text().as_deref(), Some("AM5"));
        assert_eq!(AttrValue::from("   ").as_text(), None);
        assert_eq!(AttrValue::from(1700).as_text().as_deref(), Some("1700"));
        assert_eq!(
            AttrValue::from("ATX, Micro-ATX,").as_text_list().unwrap(),
            vec!["ATX".to_string(), "Micro-ATX".to_string()]
        );
        assert_eq!(
            AttrValue::from(vec!["AM4", "AM5"]).as_text_list().unwrap(),
            vec!["AM4".to_string(), "AM5".to_string()]
        );
    }

    #[test]
    fn test_numeric_values_of_map() {
        let support = AttrValue::object([("front", AttrValue::from(360)), ("top", "240mm".into())]);
        let mut values = support.numeric_values().unwrap();
        values.sort_by(f64::total_cmp);
        assert_eq!(values, vec![240.0, 360.0]);
    }

    #[test]
    fn test_truthiness() {
        assert!(AttrValue::from(true).is_truthy());
        assert!(AttrValue::from("yes").is_truthy());
        assert!(!AttrValue::from("").is_truthy());
        assert!(!AttrValue::from(0).is_truthy());
        assert!(!AttrValue::Null.is_truthy());
    }

    #[test]
    fn test_untagged_json_shape() {
        let component: Component = serde_json::from_value(serde_json::json!({
            "id": "gpu-1",
            "category": "gpu",
            "name": "RTX 4070",
            "price": 599.0,
            "lowestPrice": 549.0,
            "attributes": {
                "length": 285,
                "powerRequirement": "200W",
                "specs": [{"name": "slots", "value": 2.5}]
            }
        }))
        .unwrap();
        assert_eq!(component.category, Some(Category::Gpu));
        assert_eq!(component.attributes["length"], AttrValue::Integer(285));
        assert!(matches!(component.attributes["specs"], AttrValue::Array(_)));
        assert_eq!(component.effective_price(), 549.0);
    }

    #[test]
    fn test_effective_price_fallback() {
        let base = Component::new("x", Category::Case, "Box", 80.0);
        assert_eq!(base.effective_price(), 80.0);
        assert_eq!(base.clone().with_lowest_price(0.0).effective_price(), 80.0);
        assert_eq!(base.with_lowest_price(70.0).effective_price(), 70.0);
    }

    #[test]
    fn test_catalog_insert_requires_category() {
        let mut catalog = Catalog::new();
        catalog
            .insert(Component::new("c1", Category::Cpu, "Ryzen", 200.0))
            .unwrap();
        let mut orphan = Component::new("c2", Category::Cpu, "Orphan", 10.0);
        orphan.category = None;
        assert!(catalog.insert(orphan).is_err());
        assert_eq!(catalog.options(Category::Cpu).len(), 1);
        assert!(catalog.options(Category::Gpu).is_empty());
        assert_eq!(catalog.len(), 1);
    }

    proptest! {
        #[test]
        fn test_as_number_never_yields_non_finite(raw in ".*") {
            if let Some(n) = AttrValue::from(raw.as_str()).as_number() {
                prop_assert!(n.is_finite());
            }
        }

        #[test]
        fn test_unit_suffix_is_ignored(n in 0u32..100_000, unit in "(mm| mm|W| W|cm|GB)") {
            let value = AttrValue::from(format!("{n}{unit}"));
            prop_assert_eq!(value.as_number(), Some(n as f64));
            prop_assert_eq!(value.as_digits(), Some(n as f64));
        }
    }
}
