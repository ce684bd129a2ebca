//! WooCommerce request and response payloads.
//!
//! Only the fields the uploader reads or writes are modelled. Optional
//! request fields are omitted when `None`: the REST schema validates types,
//! so an explicit `null` for a string field such as `sku` is rejected.

use serde::{Deserialize, Serialize};

/// A product category as listed by `GET products/categories`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Body of `POST products/categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCategory {
    pub name: String,
}

/// Reference to an existing category inside a product payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryRef {
    pub id: i64,
}

/// Response of any create call; only the assigned id matters here.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CreatedResource {
    #[serde(default)]
    pub id: Option<i64>,
}

/// WooCommerce product type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Simple,
    Variable,
}

impl std::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductKind::Simple => write!(f, "simple"),
            ProductKind::Variable => write!(f, "variable"),
        }
    }
}

/// Product image: either a URL to sideload (`src`) or an existing media
/// library item (`id`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImagePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Body of `POST products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(rename = "type")]
    pub kind: ProductKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImagePayload>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<CategoryRef>,
}

/// A variation attribute attached to a variable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductAttribute {
    pub name: String,
    pub position: u32,
    pub visible: bool,
    pub variation: bool,
    /// One entry per variant, in variant order; `None` where a variant does
    /// not carry this attribute.
    pub options: Vec<Option<String>>,
}

/// Body of `PUT products/{id}` when attaching attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeUpdate {
    pub attributes: Vec<ProductAttribute>,
}

/// One `{name, option}` pair on a variation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeOption {
    pub name: String,
    pub option: String,
}

/// Body of `POST products/{id}/variations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariationPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub manage_stock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i64>,
    pub attributes: Vec<AttributeOption>,
}
