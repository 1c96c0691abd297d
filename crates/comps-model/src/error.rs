use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("comp set name is required")]
    EmptyCompSetName,
    #[error("comp set name {0:?} has no filesystem-safe characters")]
    UnusableCompSetName(String),
    #[error("at least one property is required")]
    NoProperties,
    #[error("property at position {index} has neither property_id nor property_name")]
    MissingIdentity { index: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
