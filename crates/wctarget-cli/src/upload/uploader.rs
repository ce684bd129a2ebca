//! Per-product upload sequence:
//! category resolve, product create, then for variable products an
//! attribute update and one variation create per variant.
//!
//! Requests are issued strictly one at a time in input order. A failure
//! stops the run; anything already created stays on the remote side.

use tracing::Instrument;
use wctarget_client::api::endpoints;
use wctarget_client::types::{AttributeUpdate, ProductKind};
use wctarget_client::WooApi;
use wctarget_core::{ProductRecord, VariantRecord};

use super::categories::{CategoryResolver, Resolution};
use super::error::{check, created_id, Step, UploadError};
use super::mapping::{
    build_attributes, build_product_payload, build_variation_payload, derive_attribute_names,
    product_kind,
};

/// Counters for one run, logged when it completes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UploadReport {
    pub products_seen: usize,
    pub products_created: usize,
    pub categories_created: usize,
    pub categories_reused: usize,
    pub variations_created: usize,
}

pub(crate) struct ProductUploader<'a, A> {
    api: &'a A,
    categories: CategoryResolver,
    report: UploadReport,
}

impl<'a, A: WooApi> ProductUploader<'a, A> {
    pub(crate) fn new(api: &'a A) -> Self {
        Self {
            api,
            categories: CategoryResolver::new(),
            report: UploadReport::default(),
        }
    }

    pub(crate) fn into_report(self) -> UploadReport {
        self.report
    }

    /// Uploads every product in order, stopping at the first error.
    pub(crate) async fn upload_all(&mut self, products: &[ProductRecord]) -> Result<(), UploadError> {
        for (index, product) in products.iter().enumerate() {
            let span = tracing::info_span!(
                "product",
                index,
                title = product.title.as_deref().unwrap_or_default(),
                sku = product.sku.as_deref().unwrap_or_default(),
            );
            self.report.products_seen += 1;
            self.upload_product(product).instrument(span).await?;
        }
        Ok(())
    }

    /// Uploads one product and returns its remote id.
    pub(crate) async fn upload_product(&mut self, product: &ProductRecord) -> Result<i64, UploadError> {
        let kind = product_kind(product);

        let category_id = match product.category_name() {
            Some(name) => self.resolve_category(name).await?,
            None => {
                tracing::debug!("no category label; product left uncategorised");
                None
            }
        };

        let payload = build_product_payload(product, kind, category_id);
        let response = check(
            Step::CreateProduct,
            self.api.post(endpoints::PRODUCTS, &payload).await?,
        )?;
        let product_id = created_id(Step::CreateProduct, &response)?.ok_or(UploadError::MissingId {
            step: Step::CreateProduct,
        })?;
        self.report.products_created += 1;
        tracing::info!(product_id, %kind, "product created");

        if kind == ProductKind::Variable {
            self.upload_variations(product_id, product.variants()).await?;
        }

        Ok(product_id)
    }

    async fn resolve_category(&mut self, name: &str) -> Result<Option<i64>, UploadError> {
        let resolution = self.categories.resolve(self.api, name).await?;
        match resolution {
            Resolution::Existing(_) => self.report.categories_reused += 1,
            Resolution::Created(_) | Resolution::CreatedWithoutId => {
                self.report.categories_created += 1;
            }
        }
        Ok(resolution.id())
    }

    async fn upload_variations(
        &mut self,
        product_id: i64,
        variants: &[VariantRecord],
    ) -> Result<(), UploadError> {
        let names = derive_attribute_names(variants);
        let update = AttributeUpdate {
            attributes: build_attributes(&names, variants),
        };
        check(
            Step::AttachAttributes,
            self.api.put(&endpoints::product(product_id), &update).await?,
        )?;
        tracing::debug!(product_id, attributes = ?names, "attributes attached");

        let path = endpoints::variations(product_id);
        for variant in variants {
            let payload = build_variation_payload(variant, &names);
            check(Step::CreateVariation, self.api.post(&path, &payload).await?)?;
            self.report.variations_created += 1;
        }
        tracing::info!(product_id, variations = variants.len(), "variations created");

        Ok(())
    }
}

#[cfg(test)]
#[path = "uploader_test.rs"]
mod tests;
