use crate::boundaries::error::BoundaryError;
use crate::dataset::error::DatasetError;
use crate::prediction::error::PredictionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LapsError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Boundary(#[from] BoundaryError),

    #[error(transparent)]
    Prediction(#[from] PredictionError),
}
