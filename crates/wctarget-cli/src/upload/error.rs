use thiserror::Error;
use wctarget_client::types::CreatedResource;
use wctarget_client::{ApiResponse, ClientError};

/// Remote step of the per-product sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    ListCategories,
    CreateCategory,
    CreateProduct,
    AttachAttributes,
    CreateVariation,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::ListCategories => write!(f, "category listing"),
            Step::CreateCategory => write!(f, "category creation"),
            Step::CreateProduct => write!(f, "product creation"),
            Step::AttachAttributes => write!(f, "attribute update"),
            Step::CreateVariation => write!(f, "variation creation"),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum UploadError {
    /// The platform answered with status >= 400. `message` is the remote
    /// `message` field, verbatim.
    #[error("{step} rejected with HTTP {status}: {message}")]
    Rejected {
        step: Step,
        status: u16,
        message: String,
    },

    #[error("{step} response did not include a resource id")]
    MissingId { step: Step },

    #[error("failed to decode {step} response: {source}")]
    Decode {
        step: Step,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl UploadError {
    /// `true` for platform rejections, the only failure the run step absorbs.
    pub(crate) fn is_rejection(&self) -> bool {
        matches!(self, UploadError::Rejected { .. })
    }
}

/// Passes successful responses through and turns any status >= 400 into
/// [`UploadError::Rejected`].
pub(crate) fn check(step: Step, response: ApiResponse) -> Result<ApiResponse, UploadError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(UploadError::Rejected {
            step,
            status: response.status,
            message: response.error_message(),
        })
    }
}

/// Id assigned by a create call, if the response carried one.
pub(crate) fn created_id(step: Step, response: &ApiResponse) -> Result<Option<i64>, UploadError> {
    response
        .json::<CreatedResource>()
        .map(|created| created.id)
        .map_err(|source| UploadError::Decode { step, source })
}
