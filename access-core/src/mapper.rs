//! Permission Mapping Service
//!
//! Converts between the UI's module -> actions view and the backend's flat
//! id list or `{id, name}` records.
//!
//! Every operation is total: unknown modules, actions and ids are dropped
//! from the output rather than reported. Callers needing strict validation
//! can use [`PermissionMapper::find_name_mismatches`] or check the catalog
//! directly.

use crate::catalog::PermissionCatalog;
use crate::config::Config;
use crate::models::{
    CompanyAccess, ModulePermissions, NamedPermission, NormalizedCompanyAccess, PermissionId, Role,
};
use serde::{Deserialize, Serialize};

/// A `{id, name}` record whose name disagrees with the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameMismatch {
    pub id: PermissionId,
    pub supplied: String,
    /// Catalog label for `id`; `None` when the id is not in the catalog
    pub expected: Option<String>,
}

/// Stateless converter bound to one catalog
#[derive(Debug, Clone, Copy)]
pub struct PermissionMapper<'a> {
    catalog: &'a PermissionCatalog,
    warn_name_mismatch: bool,
}

impl PermissionMapper<'static> {
    /// Mapper over the built-in catalog
    pub fn builtin() -> Self {
        Self::new(PermissionCatalog::builtin())
    }
}

impl<'a> PermissionMapper<'a> {
    pub fn new(catalog: &'a PermissionCatalog) -> Self {
        Self {
            catalog,
            warn_name_mismatch: true,
        }
    }

    /// Toggle the warning logged when a named permission disagrees with its id
    pub fn warn_name_mismatch(mut self, enabled: bool) -> Self {
        self.warn_name_mismatch = enabled;
        self
    }

    /// Apply the mapper settings carried by `config`
    pub fn with_config(self, config: &Config) -> Self {
        self.warn_name_mismatch(config.warn_name_mismatch)
    }

    pub fn catalog(&self) -> &'a PermissionCatalog {
        self.catalog
    }

    /// Module -> actions into a flat id list, in input order
    ///
    /// Pairs with an unknown module or action are skipped. No deduplication
    /// is performed.
    pub fn to_permission_ids(&self, module_permissions: &ModulePermissions) -> Vec<PermissionId> {
        let mut ids = Vec::new();
        for (module, actions) in module_permissions {
            for action in actions {
                match self.catalog.permission_id(module, action) {
                    Some(id) => ids.push(id),
                    None => tracing::debug!(%module, %action, "dropping unknown permission"),
                }
            }
        }
        ids
    }

    /// Flat id list into module -> actions
    ///
    /// Modules appear in the order their first id was seen and actions in
    /// the order supplied. Repeated ids yield repeated actions; unknown ids
    /// are skipped.
    pub fn to_module_permissions<I>(&self, ids: I) -> ModulePermissions
    where
        I: IntoIterator<Item = PermissionId>,
    {
        let mut out = ModulePermissions::new();
        for id in ids {
            match self.catalog.resolve(id) {
                Some((module, action)) => out
                    .entry(module.name().to_string())
                    .or_default()
                    .push(action.name().to_string()),
                None => tracing::debug!(%id, "dropping unknown permission id"),
            }
        }
        out
    }

    /// `{id, name}` records into module -> actions
    ///
    /// Only `id` is used; when `name` disagrees with the catalog the catalog
    /// wins.
    pub fn to_module_permissions_from_named(&self, named: &[NamedPermission]) -> ModulePermissions {
        if self.warn_name_mismatch {
            for mismatch in self.find_name_mismatches(named) {
                if let Some(expected) = &mismatch.expected {
                    tracing::warn!(
                        id = %mismatch.id,
                        supplied = %mismatch.supplied,
                        %expected,
                        "permission name does not match catalog, using id"
                    );
                }
            }
        }
        self.to_module_permissions(named.iter().map(|p| p.id))
    }

    /// Records whose name differs (ignoring case) from the catalog label,
    /// plus records whose id is unknown
    pub fn find_name_mismatches(&self, named: &[NamedPermission]) -> Vec<NameMismatch> {
        named
            .iter()
            .filter_map(|p| match self.catalog.label(p.id) {
                Some(label) if label.eq_ignore_ascii_case(&p.name) => None,
                expected => Some(NameMismatch {
                    id: p.id,
                    supplied: p.name.clone(),
                    expected,
                }),
            })
            .collect()
    }

    /// Build outbound payloads for company access grants, one per input
    ///
    /// `roleId` falls back to the id of `roleName`. A `roleName` naming an
    /// elevated role grants every catalog permission; a bare `roleId` never
    /// does.
    pub fn normalize_company_access(&self, accesses: &[CompanyAccess]) -> Vec<NormalizedCompanyAccess> {
        accesses
            .iter()
            .map(|access| {
                let role = access.role_name.as_deref().and_then(Role::from_name);
                let role_id = access.role_id.or_else(|| role.map(|r| r.id()));
                let elevated = role.is_some_and(|r| r.is_elevated());

                let permission_ids = if elevated {
                    self.catalog.all_permission_ids()
                } else {
                    self.to_permission_ids(&access.module_permissions)
                };

                if role_id.is_none() {
                    tracing::debug!(company_id = access.company_id, "company access has no resolvable role");
                }

                NormalizedCompanyAccess {
                    company_id: access.company_id,
                    role_id,
                    permission_ids,
                }
            })
            .collect()
    }
}
