//! Category lookup-or-create with a per-run cache.
//!
//! A name seen once in a run (listed remotely or created here) is never
//! looked up or created again, so repeated labels in one input file resolve
//! to a single category. Nothing guards against concurrent runs.

use std::collections::HashMap;

use wctarget_client::api::endpoints;
use wctarget_client::types::{Category, NewCategory};
use wctarget_client::WooApi;

use super::error::{check, created_id, Step, UploadError};

/// Page size requested when listing categories (the REST maximum).
pub(crate) const CATEGORY_PAGE_SIZE: u32 = 100;

/// Listing stops after this many pages even if the last one was full.
pub(crate) const MAX_CATEGORY_PAGES: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resolution {
    Existing(i64),
    Created(i64),
    /// Creation succeeded but the response carried no id; the product is
    /// uploaded without a category.
    CreatedWithoutId,
}

impl Resolution {
    pub(crate) fn id(self) -> Option<i64> {
        match self {
            Resolution::Existing(id) | Resolution::Created(id) => Some(id),
            Resolution::CreatedWithoutId => None,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct CategoryResolver {
    known: HashMap<String, i64>,
}

impl CategoryResolver {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the id of the category called `name`, creating it when the
    /// remote catalogue has none.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::Rejected`] when listing or creation is refused,
    /// and [`UploadError::Decode`] / [`UploadError::Client`] on malformed
    /// responses or transport failure.
    pub(crate) async fn resolve<A: WooApi>(
        &mut self,
        api: &A,
        name: &str,
    ) -> Result<Resolution, UploadError> {
        if let Some(&id) = self.known.get(name) {
            return Ok(Resolution::Existing(id));
        }

        self.refresh(api).await?;
        if let Some(&id) = self.known.get(name) {
            tracing::debug!(category = name, id, "reusing existing category");
            return Ok(Resolution::Existing(id));
        }

        let body = NewCategory {
            name: name.to_owned(),
        };
        let response = check(
            Step::CreateCategory,
            api.post(endpoints::CATEGORIES, &body).await?,
        )?;

        match created_id(Step::CreateCategory, &response)? {
            Some(id) => {
                tracing::info!(category = name, id, "created category");
                self.known.insert(name.to_owned(), id);
                Ok(Resolution::Created(id))
            }
            None => {
                tracing::warn!(
                    category = name,
                    "category created but response had no id; product will be uncategorised"
                );
                Ok(Resolution::CreatedWithoutId)
            }
        }
    }

    /// Pulls the full remote category list into the cache. Earlier entries
    /// win when the remote catalogue holds duplicate names.
    async fn refresh<A: WooApi>(&mut self, api: &A) -> Result<(), UploadError> {
        for page in 1..=MAX_CATEGORY_PAGES {
            let path = endpoints::categories_page(page, CATEGORY_PAGE_SIZE);
            let response = check(Step::ListCategories, api.get(&path).await?)?;
            let categories: Vec<Category> =
                response.json().map_err(|source| UploadError::Decode {
                    step: Step::ListCategories,
                    source,
                })?;

            let count = categories.len();
            for category in categories {
                self.known
                    .entry(decode_entities(&category.name))
                    .or_insert(category.id);
            }

            if count < CATEGORY_PAGE_SIZE as usize {
                return Ok(());
            }
        }

        tracing::warn!(
            max_pages = MAX_CATEGORY_PAGES,
            "category listing truncated; later categories may be duplicated"
        );
        Ok(())
    }
}

/// WordPress returns term names HTML-escaped (`Shirts &amp; Tops`); undo the
/// entities it emits so names compare equal to the raw input labels.
fn decode_entities(name: &str) -> String {
    if !name.contains('&') {
        return name.to_owned();
    }
    name.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
