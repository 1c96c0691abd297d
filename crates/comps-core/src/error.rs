//! Lifecycle error taxonomy.

use std::path::PathBuf;

use comps_model::ModelError;
use comps_store::StoreError;
use thiserror::Error;

/// Broad class of a [`CompsError`], used to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Validation,
    StorageIo,
    UpstreamUnavailable,
}

#[derive(Debug, Error)]
pub enum CompsError {
    #[error("comp set {name:?} not found")]
    CompSetNotFound { name: String },

    #[error("property {property_id:?} not found in comp set {name:?}")]
    PropertyNotFound { name: String, property_id: String },

    #[error("comp set {name:?} already exists")]
    AlreadyExists { name: String },

    #[error("{0}")]
    Invalid(#[from] ModelError),

    #[error("either newName or properties must be provided")]
    EmptyUpdate,

    #[error("comparables data not found at {}", path.display())]
    DatasetUnavailable { path: PathBuf },

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl CompsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CompSetNotFound { .. } | Self::PropertyNotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::Conflict,
            Self::Invalid(_) | Self::EmptyUpdate => ErrorKind::Validation,
            Self::DatasetUnavailable { .. } => ErrorKind::UpstreamUnavailable,
            Self::Storage(_) => ErrorKind::StorageIo,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompsError>;
