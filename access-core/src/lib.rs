//! Access mapping for the business-admin application
//!
//! Translates a user's or company's access grants between the three shapes
//! in circulation:
//! - module -> actions, as the UI edits them ([`ModulePermissions`])
//! - flat permission ids, as the backend stores them ([`PermissionId`])
//! - `{id, name}` records, an alternate backend response ([`NamedPermission`])
//!
//! The id table lives in a validated [`PermissionCatalog`]; conversions go
//! through a [`PermissionMapper`]. The free functions below use the built-in
//! catalog and read their settings from [`Config::from_env`] once per process.
//!
//! # Example
//!
//! ```
//! use access_core::{CompanyAccess, ModulePermissions, PermissionId};
//!
//! let mut perms = ModulePermissions::new();
//! perms.insert("sales".into(), vec!["View".into()]);
//! assert_eq!(access_core::to_permission_ids(&perms), vec![PermissionId(21)]);
//!
//! let access = CompanyAccess::new(1).with_role_name("Manager");
//! let normalized = access_core::normalize_company_access(&[access]);
//! assert_eq!(normalized[0].role_id, Some(2));
//! assert_eq!(normalized[0].permission_ids.len(), 16);
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod mapper;
pub mod models;

// Re-exports
pub use catalog::{BUILTIN_ENTRIES, PermissionCatalog};
pub use config::Config;
pub use error::{CatalogError, CatalogResult};
pub use mapper::{NameMismatch, PermissionMapper};
pub use models::*;

use std::sync::OnceLock;

/// Built-in mapper with the process environment's settings applied
fn default_mapper() -> PermissionMapper<'static> {
    static ENV_CONFIG: OnceLock<Config> = OnceLock::new();
    PermissionMapper::builtin().with_config(ENV_CONFIG.get_or_init(Config::from_env))
}

/// See [`PermissionMapper::to_permission_ids`]
pub fn to_permission_ids(module_permissions: &ModulePermissions) -> Vec<PermissionId> {
    default_mapper().to_permission_ids(module_permissions)
}

/// See [`PermissionMapper::to_module_permissions`]
pub fn to_module_permissions(ids: &[PermissionId]) -> ModulePermissions {
    default_mapper().to_module_permissions(ids.iter().copied())
}

/// See [`PermissionMapper::to_module_permissions_from_named`]
pub fn to_module_permissions_from_named(named: &[NamedPermission]) -> ModulePermissions {
    default_mapper().to_module_permissions_from_named(named)
}

/// See [`PermissionMapper::normalize_company_access`]
pub fn normalize_company_access(accesses: &[CompanyAccess]) -> Vec<NormalizedCompanyAccess> {
    default_mapper().normalize_company_access(accesses)
}

/// Every permission id in the built-in catalog
pub fn all_permission_ids() -> Vec<PermissionId> {
    PermissionCatalog::builtin().all_permission_ids()
}
