//! Upload of `products.json` to a WooCommerce store.
//!
//! [`upload`] is the run step called from `main`: it locates the input file,
//! drives [`ProductUploader`] over its records, absorbs platform rejections
//! into the returned [`RunOutcome`] and lets every other error propagate.

mod categories;
mod error;
mod mapping;
mod uploader;

#[cfg(test)]
pub(crate) mod fake_api;

use std::path::Path;

use tracing::Instrument;
use wctarget_client::WooApi;
use wctarget_core::{load_products, products_file};

#[cfg(test)]
pub(crate) use error::Step;
pub(crate) use error::UploadError;
pub(crate) use uploader::{ProductUploader, UploadReport};

/// How a run ended.
#[derive(Debug)]
pub(crate) enum RunOutcome {
    /// No `products.json` in the input directory; nothing was sent.
    NoInput,
    /// Dry run: products were mapped and logged but not sent.
    Previewed { products: usize },
    Uploaded(UploadReport),
    /// The platform rejected a step; earlier uploads stay in place.
    Rejected {
        report: UploadReport,
        error: UploadError,
    },
}

/// Uploads `<input_path>/products.json` through `api`.
///
/// # Errors
///
/// Returns an error if the input file cannot be read or parsed, or if an
/// upload step fails for any reason other than a platform rejection
/// (transport failure, undecodable response, missing resource id).
pub(crate) async fn upload<A: WooApi>(api: &A, input_path: &Path) -> anyhow::Result<RunOutcome> {
    let path = products_file(input_path);
    if !path.exists() {
        tracing::info!(path = %path.display(), "products.json not found; skipping upload");
        return Ok(RunOutcome::NoInput);
    }

    tracing::info!(path = %path.display(), "found products.json, uploading");
    let products = load_products(&path)?;

    let span = tracing::info_span!("upload", products = products.len());
    let mut uploader = ProductUploader::new(api);
    let result = uploader.upload_all(&products).instrument(span).await;
    let report = uploader.into_report();

    let outcome = match result {
        Ok(()) => {
            tracing::info!("products.json uploaded");
            RunOutcome::Uploaded(report)
        }
        Err(error) if error.is_rejection() => {
            tracing::error!(error = %error, "upload error");
            RunOutcome::Rejected { report, error }
        }
        Err(error) => return Err(error.into()),
    };

    tracing::info!(
        products_seen = report.products_seen,
        products_created = report.products_created,
        categories_created = report.categories_created,
        categories_reused = report.categories_reused,
        variations_created = report.variations_created,
        "posting process has completed"
    );
    Ok(outcome)
}

/// Maps every product in `<input_path>/products.json` and logs the payloads
/// without contacting the store. Category ids are unknown here, so product
/// payloads carry no `categories`.
///
/// # Errors
///
/// Returns an error if the input file cannot be read or parsed.
pub(crate) fn preview(input_path: &Path) -> anyhow::Result<RunOutcome> {
    let path = products_file(input_path);
    if !path.exists() {
        tracing::info!(path = %path.display(), "products.json not found; skipping upload");
        return Ok(RunOutcome::NoInput);
    }

    let products = load_products(&path)?;
    for (index, product) in products.iter().enumerate() {
        let kind = mapping::product_kind(product);
        let payload = serde_json::to_string(&mapping::build_product_payload(product, kind, None))?;
        tracing::info!(
            index,
            %kind,
            category = product.category_name().unwrap_or_default(),
            %payload,
            "dry-run: would create product"
        );

        let variants = product.variants();
        if !variants.is_empty() {
            let names = mapping::derive_attribute_names(variants);
            let attributes = serde_json::to_string(&mapping::build_attributes(&names, variants))?;
            tracing::info!(
                index,
                %attributes,
                variations = variants.len(),
                "dry-run: would attach attributes and create variations"
            );
        }
    }

    tracing::info!(products = products.len(), "dry-run complete; nothing was sent");
    Ok(RunOutcome::Previewed {
        products: products.len(),
    })
}
