//! Catalog errors
//!
//! Mapping operations never fail; only building or loading a permission
//! catalog does.

use crate::models::{Action, Module, PermissionId};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("permission {module}:{action} has a non-positive id, ids must be positive")]
    InvalidId { module: Module, action: Action },

    #[error("permission {module}:{action} is defined more than once")]
    DuplicatePermission { module: Module, action: Action },

    #[error("permission id {id} is assigned to both {first} and {second}")]
    DuplicateId {
        id: PermissionId,
        first: String,
        second: String,
    },

    #[error("forward and reverse permission tables diverge: {0}")]
    Inconsistent(String),

    #[error("failed to read permission catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid permission catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
