use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChurnverseError {
    #[error("Invalid configuration. Error message: `{0}`")]
    InvalidConfiguration(String),
    #[error("Unable to access the card store. Error message: `{0}`")]
    StorageUnavailable(String),
}
