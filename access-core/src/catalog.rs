//! Permission Catalog
//!
//! The single source of truth for (module, action) <-> id lookups.
//!
//! The catalog is built from one list of entries; the reverse table is
//! derived from it and the pair is checked to be a bijection before the
//! catalog is handed out. The built-in table is constructed once per process
//! and never changes afterwards.

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Action, Module, PermissionEntry, PermissionId};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

/// Built-in permission table
///
/// | Module    | View | Add | Edit | Delete |
/// |-----------|------|-----|------|--------|
/// | sales     | 21   | 22  | 23   | 24     |
/// | purchase  | 1    | 2   | 3    | 4      |
/// | finance   | 9    | 10  | 11   | 12     |
/// | inventory | 5    | 6   | 7    | 8      |
pub const BUILTIN_ENTRIES: &[PermissionEntry] = &[
    PermissionEntry::new(Module::Sales, Action::View, 21),
    PermissionEntry::new(Module::Sales, Action::Add, 22),
    PermissionEntry::new(Module::Sales, Action::Edit, 23),
    PermissionEntry::new(Module::Sales, Action::Delete, 24),
    PermissionEntry::new(Module::Purchase, Action::View, 1),
    PermissionEntry::new(Module::Purchase, Action::Add, 2),
    PermissionEntry::new(Module::Purchase, Action::Edit, 3),
    PermissionEntry::new(Module::Purchase, Action::Delete, 4),
    PermissionEntry::new(Module::Finance, Action::View, 9),
    PermissionEntry::new(Module::Finance, Action::Add, 10),
    PermissionEntry::new(Module::Finance, Action::Edit, 11),
    PermissionEntry::new(Module::Finance, Action::Delete, 12),
    PermissionEntry::new(Module::Inventory, Action::View, 5),
    PermissionEntry::new(Module::Inventory, Action::Add, 6),
    PermissionEntry::new(Module::Inventory, Action::Edit, 7),
    PermissionEntry::new(Module::Inventory, Action::Delete, 8),
];

static BUILTIN: OnceLock<PermissionCatalog> = OnceLock::new();

/// Validated bidirectional permission table
#[derive(Debug, Clone)]
pub struct PermissionCatalog {
    entries: Vec<PermissionEntry>,
    forward: HashMap<(Module, Action), PermissionId>,
    reverse: HashMap<PermissionId, (Module, Action)>,
}

impl PermissionCatalog {
    /// The built-in catalog
    ///
    /// # Panics
    ///
    /// Panics on first use if [`BUILTIN_ENTRIES`] is not a bijection. Every
    /// conversion would be silently wrong otherwise.
    pub fn builtin() -> &'static PermissionCatalog {
        BUILTIN.get_or_init(|| {
            Self::from_entries(BUILTIN_ENTRIES.iter().copied())
                .unwrap_or_else(|e| panic!("FATAL: built-in permission table is invalid: {e}"))
        })
    }

    /// Build a catalog, rejecting non-positive ids, repeated pairs and repeated ids
    pub fn from_entries(entries: impl IntoIterator<Item = PermissionEntry>) -> CatalogResult<Self> {
        let entries: Vec<PermissionEntry> = entries.into_iter().collect();
        let mut forward = HashMap::with_capacity(entries.len());
        let mut reverse = HashMap::with_capacity(entries.len());

        for entry in &entries {
            if entry.id.get() <= 0 {
                return Err(CatalogError::InvalidId {
                    module: entry.module,
                    action: entry.action,
                });
            }
            if forward.insert((entry.module, entry.action), entry.id).is_some() {
                return Err(CatalogError::DuplicatePermission {
                    module: entry.module,
                    action: entry.action,
                });
            }
            if let Some((module, action)) = reverse.insert(entry.id, (entry.module, entry.action)) {
                return Err(CatalogError::DuplicateId {
                    id: entry.id,
                    first: format!("{module}:{action}"),
                    second: format!("{}:{}", entry.module, entry.action),
                });
            }
        }

        let catalog = Self {
            entries,
            forward,
            reverse,
        };
        catalog.verify_bijection()?;

        tracing::debug!(entries = catalog.len(), "permission catalog built");
        Ok(catalog)
    }

    /// Parse a JSON array of `{ "module", "action", "id" }` records
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let entries: Vec<PermissionEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Load a catalog file (see [`from_json`](Self::from_json) for the format)
    pub fn from_path(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), entries = catalog.len(), "loaded permission catalog");
        Ok(catalog)
    }

    fn verify_bijection(&self) -> CatalogResult<()> {
        if self.forward.len() != self.reverse.len() || self.forward.len() != self.entries.len() {
            return Err(CatalogError::Inconsistent(format!(
                "{} entries, {} forward, {} reverse",
                self.entries.len(),
                self.forward.len(),
                self.reverse.len()
            )));
        }
        for (&(module, action), id) in &self.forward {
            if self.reverse.get(id) != Some(&(module, action)) {
                return Err(CatalogError::Inconsistent(format!(
                    "{module}:{action} -> {id} has no matching reverse entry"
                )));
            }
        }
        Ok(())
    }

    /// Id of a typed (module, action) pair
    pub fn id_of(&self, module: Module, action: Action) -> Option<PermissionId> {
        self.forward.get(&(module, action)).copied()
    }

    /// Id of a (module, action) pair given by wire names
    ///
    /// Returns `None` for unknown modules or actions.
    pub fn permission_id(&self, module: &str, action: &str) -> Option<PermissionId> {
        let module = module.parse().ok()?;
        let action = action.parse().ok()?;
        self.id_of(module, action)
    }

    /// The (module, action) pair an id stands for
    pub fn resolve(&self, id: PermissionId) -> Option<(Module, Action)> {
        self.reverse.get(&id).copied()
    }

    /// Canonical name of an id, e.g. `sales:view`
    pub fn label(&self, id: PermissionId) -> Option<String> {
        self.resolve(id)
            .map(|(module, action)| PermissionEntry { module, action, id }.label())
    }

    /// Every id in the catalog, in table order
    pub fn all_permission_ids(&self) -> Vec<PermissionId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    pub fn entries(&self) -> &[PermissionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        let catalog = PermissionCatalog::builtin();
        assert_eq!(catalog.len(), 16);
        assert_eq!(catalog.permission_id("sales", "View"), Some(PermissionId(21)));
        assert_eq!(catalog.permission_id("inventory", "Delete"), Some(PermissionId(8)));
        assert_eq!(
            catalog.resolve(PermissionId(10)),
            Some((Module::Finance, Action::Add))
        );
    }

    #[test]
    fn test_unknown_lookups() {
        let catalog = PermissionCatalog::builtin();
        assert_eq!(catalog.permission_id("nonexistent", "View"), None);
        assert_eq!(catalog.permission_id("sales", "Approve"), None);
        assert_eq!(catalog.resolve(PermissionId(99999)), None);
        assert_eq!(catalog.label(PermissionId(0)), None);
    }

    #[test]
    fn test_label() {
        let catalog = PermissionCatalog::builtin();
        assert_eq!(catalog.label(PermissionId(3)).as_deref(), Some("purchase:edit"));
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let err = PermissionCatalog::from_entries([
            PermissionEntry::new(Module::Sales, Action::View, 1),
            PermissionEntry::new(Module::Purchase, Action::View, 1),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { id: PermissionId(1), .. }));
        assert_eq!(
            err.to_string(),
            "permission id 1 is assigned to both sales:View and purchase:View"
        );
    }

    #[test]
    fn test_rejects_duplicate_pair() {
        let err = PermissionCatalog::from_entries([
            PermissionEntry::new(Module::Sales, Action::View, 1),
            PermissionEntry::new(Module::Sales, Action::View, 2),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::DuplicatePermission {
                module: Module::Sales,
                action: Action::View
            }
        ));
    }

    #[test]
    fn test_rejects_zero_id() {
        let err = PermissionCatalog::from_entries([PermissionEntry::new(
            Module::Finance,
            Action::Edit,
            0,
        )])
        .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidId { .. }));
    }

    #[test]
    fn test_rejects_negative_id() {
        let err = PermissionCatalog::from_json(r#"[{ "module": "sales", "action": "Add", "id": -5 }]"#)
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidId {
                module: Module::Sales,
                action: Action::Add
            }
        ));
    }

    #[test]
    fn test_from_json() {
        let catalog = PermissionCatalog::from_json(
            r#"[
                { "module": "sales", "action": "View", "id": 100 },
                { "module": "finance", "action": "Delete", "id": 200 }
            ]"#,
        )
        .unwrap();
        assert_eq!(catalog.all_permission_ids(), vec![PermissionId(100), PermissionId(200)]);
        assert_eq!(catalog.permission_id("sales", "Add"), None);
    }

    #[test]
    fn test_from_json_rejects_unknown_module() {
        let err = PermissionCatalog::from_json(r#"[{ "module": "hr", "action": "View", "id": 1 }]"#)
            .unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
