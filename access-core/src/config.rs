use crate::catalog::PermissionCatalog;
use crate::error::CatalogResult;
use std::borrow::Cow;
use std::path::PathBuf;

/// Access mapping configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ACCESS_CATALOG_PATH | (unset) | custom permission catalog JSON file |
/// | ACCESS_WARN_NAME_MISMATCH | true | warn when a named permission disagrees with the catalog |
/// | LOG_LEVEL | info | default log level |
#[derive(Debug, Clone)]
pub struct Config {
    /// Custom catalog file; `None` uses the built-in table
    pub catalog_path: Option<PathBuf>,
    /// Log a warning when a `{id, name}` record's name does not match the id
    pub warn_name_mismatch: bool,
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            catalog_path: std::env::var("ACCESS_CATALOG_PATH")
                .ok()
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            warn_name_mismatch: std::env::var("ACCESS_WARN_NAME_MISMATCH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }

    /// Override the catalog file
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    /// The configured catalog: the file at `catalog_path`, or the built-in table
    pub fn load_catalog(&self) -> CatalogResult<Cow<'static, PermissionCatalog>> {
        match &self.catalog_path {
            Some(path) => PermissionCatalog::from_path(path).map(Cow::Owned),
            None => Ok(Cow::Borrowed(PermissionCatalog::builtin())),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            warn_name_mismatch: true,
            log_level: "info".into(),
        }
    }
}
