use crate::record::OrderRecord;
use crate::render::RenderError;
use crate::store::StoreError;
use crate::validator::ValidationReport;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LensForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Validation Error: {0}")]
    Validation(ValidationReport),

    #[error("Render Error: {0}")]
    Render(#[from] RenderError),

    #[error("A newer render request superseded this one")]
    RenderSuperseded,

    #[error("Store Error: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to save order: {source}")]
    SaveFailed {
        #[source]
        source: StoreError,
        record: Box<OrderRecord>,
    },

    #[error("A save is already in progress")]
    SaveInProgress,
}

pub type LfResult<T> = Result<T, LensForgeError>;
