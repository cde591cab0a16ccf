use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Cannot decode image: {0}")]
    InvalidImage(String),

    #[error("Model inference failed: {0}")]
    InferenceFailed(String),
}
