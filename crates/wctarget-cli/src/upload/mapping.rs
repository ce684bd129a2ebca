//! Pure translation from input records to WooCommerce payloads.

use wctarget_client::types::{
    AttributeOption, CategoryRef, ImagePayload, ProductAttribute, ProductKind, ProductPayload,
    VariationPayload,
};
use wctarget_core::{ImageRecord, ProductRecord, VariantRecord};

/// `Variable` when the record has at least one variant, else `Simple`.
pub(crate) fn product_kind(record: &ProductRecord) -> ProductKind {
    if record.variants().is_empty() {
        ProductKind::Simple
    } else {
        ProductKind::Variable
    }
}

pub(crate) fn build_product_payload(
    record: &ProductRecord,
    kind: ProductKind,
    category_id: Option<i64>,
) -> ProductPayload {
    ProductPayload {
        name: record.title.clone(),
        description: record.body_html.clone(),
        short_description: record.body_html.clone(),
        kind,
        images: record
            .images
            .as_ref()
            .map(|images| images.iter().map(image_payload).collect()),
        regular_price: record.price.clone(),
        sku: record.sku.clone(),
        stock_quantity: record.inventory_quantity,
        categories: category_id.map(|id| CategoryRef { id }).into_iter().collect(),
    }
}

fn image_payload(image: &ImageRecord) -> ImagePayload {
    ImagePayload {
        id: image.id(),
        src: image.src().map(str::to_owned),
        alt: image.alt().map(str::to_owned),
        name: image.name().map(str::to_owned),
    }
}

/// Distinct non-reserved keys across all variants, in order of first
/// appearance.
pub(crate) fn derive_attribute_names(variants: &[VariantRecord]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for key in variants.iter().flat_map(|v| v.attribute_keys()) {
        if !names.iter().any(|n| n == key) {
            names.push(key.to_owned());
        }
    }
    names
}

/// One descriptor per attribute name. `options` has exactly one entry per
/// variant, not deduplicated.
pub(crate) fn build_attributes(
    names: &[String],
    variants: &[VariantRecord],
) -> Vec<ProductAttribute> {
    names
        .iter()
        .map(|name| ProductAttribute {
            name: name.clone(),
            position: 0,
            visible: false,
            variation: true,
            options: variants.iter().map(|v| v.attribute_value(name)).collect(),
        })
        .collect()
}

pub(crate) fn build_variation_payload(
    variant: &VariantRecord,
    attribute_names: &[String],
) -> VariationPayload {
    let attributes = attribute_names
        .iter()
        .filter_map(|name| {
            variant.attribute_value(name).map(|option| AttributeOption {
                name: name.clone(),
                option,
            })
        })
        .collect();

    VariationPayload {
        description: variant.title.clone(),
        regular_price: variant.price.clone(),
        sku: variant.sku.clone(),
        manage_stock: true,
        stock_quantity: variant.inventory_quantity,
        attributes,
    }
}
