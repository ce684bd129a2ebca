//! Input data model: the product records read from `products.json`.
//!
//! The file is a JSON array of storefront-style product objects. Only the
//! keys below are read; anything else on a product is ignored. Variants are
//! open-ended maps: besides the reserved keys (`sku`, `price`,
//! `inventory_quantity`, `title`) every key names a variation attribute.
//!
//! Source exports are loose about scalar types, so prices and SKUs accept
//! either strings or numbers and quantities accept integers, integer
//! strings, or whole-valued floats such as `3.0`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::InputFileError;

/// File name looked up inside the configured input directory.
pub const PRODUCTS_FILE_NAME: &str = "products.json";

/// Keys on a variant record that map to fixed variation fields rather than
/// to attributes.
pub const RESERVED_VARIANT_KEYS: [&str; 4] = ["sku", "price", "inventory_quantity", "title"];

/// One product as described by the source data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductRecord {
    #[serde(default)]
    pub title: Option<String>,

    /// HTML description; used for both the long and short description.
    #[serde(default)]
    pub body_html: Option<String>,

    #[serde(default, deserialize_with = "scalar_string")]
    pub price: Option<String>,

    #[serde(default, deserialize_with = "scalar_string")]
    pub sku: Option<String>,

    #[serde(default, deserialize_with = "quantity")]
    pub inventory_quantity: Option<i64>,

    #[serde(default)]
    pub images: Option<Vec<ImageRecord>>,

    /// Category label. Read from the input key `product_type`, which is a
    /// category name in the source data and unrelated to the simple/variable
    /// product type sent to the platform.
    #[serde(default, rename = "product_type")]
    pub category_name: Option<String>,

    #[serde(default)]
    pub variants: Option<Vec<VariantRecord>>,
}

impl ProductRecord {
    /// Variants of this product; empty when the key is absent or `null`.
    #[must_use]
    pub fn variants(&self) -> &[VariantRecord] {
        self.variants.as_deref().unwrap_or_default()
    }

    /// The category label, or `None` when absent or blank.
    #[must_use]
    pub fn category_name(&self) -> Option<&str> {
        self.category_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// A product image: a bare URL, an object carrying `src`, or a reference
/// to media already in the store's library by `id`.
///
/// Source-platform keys such as positions are dropped; they mean nothing to
/// the target platform. An object with both `src` and `id` is read as a
/// `src` image, since source-platform ids do not exist on the target.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ImageRecord {
    Url(String),
    Object {
        src: String,
        #[serde(default)]
        alt: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
    Existing {
        id: i64,
        #[serde(default)]
        alt: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl ImageRecord {
    /// Image URL, `None` for references to existing media.
    #[must_use]
    pub fn src(&self) -> Option<&str> {
        match self {
            ImageRecord::Url(src) | ImageRecord::Object { src, .. } => Some(src),
            ImageRecord::Existing { .. } => None,
        }
    }

    /// Media library id, set only for references to existing media.
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        match self {
            ImageRecord::Existing { id, .. } => Some(*id),
            ImageRecord::Url(_) | ImageRecord::Object { .. } => None,
        }
    }

    #[must_use]
    pub fn alt(&self) -> Option<&str> {
        match self {
            ImageRecord::Url(_) => None,
            ImageRecord::Object { alt, .. } | ImageRecord::Existing { alt, .. } => alt.as_deref(),
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            ImageRecord::Url(_) => None,
            ImageRecord::Object { name, .. } | ImageRecord::Existing { name, .. } => {
                name.as_deref()
            }
        }
    }
}

/// One purchasable variant of a product.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariantRecord {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "scalar_string")]
    pub price: Option<String>,

    #[serde(default, deserialize_with = "scalar_string")]
    pub sku: Option<String>,

    #[serde(default, deserialize_with = "quantity")]
    pub inventory_quantity: Option<i64>,

    /// Every non-reserved key, in input order.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl VariantRecord {
    /// Names of the attributes this variant carries, in input order.
    pub fn attribute_keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// The variant's value for `key` rendered as an option string.
    ///
    /// Strings are returned verbatim; numbers, booleans and nested values use
    /// their JSON text. A missing key or `null` yields `None`.
    #[must_use]
    pub fn attribute_value(&self, key: &str) -> Option<String> {
        match self.attributes.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Path of the products file inside `input_path`.
#[must_use]
pub fn products_file(input_path: &Path) -> PathBuf {
    input_path.join(PRODUCTS_FILE_NAME)
}

/// Read and parse a `products.json` file.
///
/// # Errors
///
/// Returns [`InputFileError::Io`] if the file cannot be read and
/// [`InputFileError::Parse`] if it is not a JSON array of product records.
pub fn load_products(path: &Path) -> Result<Vec<ProductRecord>, InputFileError> {
    let content = std::fs::read_to_string(path).map_err(|e| InputFileError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| InputFileError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

fn quantity<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => whole_number(&n)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("expected an integer, got {n}"))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.trim().parse::<i64>().map(Some).map_err(|e| {
            serde::de::Error::custom(format!("invalid integer quantity '{s}': {e}"))
        }),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected an integer, got {other}"
        ))),
    }
}

/// Integers, and floats with no fractional part (`3.0`), as `i64`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
fn whole_number(n: &serde_json::Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}
