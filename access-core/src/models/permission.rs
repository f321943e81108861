//! Permission Model
//!
//! Modules, actions and the integer ids the backend uses for each
//! (module, action) pair.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Functional area of the application that permissions are grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Sales,
    Purchase,
    Finance,
    Inventory,
}

impl Module {
    /// All modules, in table order
    pub const ALL: [Module; 4] = [Self::Sales, Self::Purchase, Self::Finance, Self::Inventory];

    /// Wire name of this module
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Purchase => "purchase",
            Self::Finance => "finance",
            Self::Inventory => "inventory",
        }
    }
}

impl FromStr for Module {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|m| m.name() == s).ok_or(())
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// CRUD-style capability within a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    View,
    Add,
    Edit,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Self::View, Self::Add, Self::Edit, Self::Delete];

    /// Wire name of this action (capitalized, as the UI sends it)
    pub fn name(&self) -> &'static str {
        match self {
            Self::View => "View",
            Self::Add => "Add",
            Self::Edit => "Edit",
            Self::Delete => "Delete",
        }
    }
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|a| a.name() == s).ok_or(())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Backend identifier of one (module, action) pair
///
/// Wide enough that any integer the backend sends deserializes; values the
/// catalog does not know, negative ones included, are dropped by the mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionId(pub i64);

impl PermissionId {
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for PermissionId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for PermissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// UI shape: module name -> granted action names
///
/// Keys and actions stay as plain strings so payloads carrying modules or
/// actions this build does not know still deserialize; the mapper drops them.
/// Insertion order is preserved.
pub type ModulePermissions = IndexMap<String, Vec<String>>;

/// Alternate backend response shape: `{ "id": 21, "name": "sales:view" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPermission {
    pub id: PermissionId,
    pub name: String,
}

impl NamedPermission {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: PermissionId(id),
            name: name.into(),
        }
    }
}

/// One row of the permission table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionEntry {
    pub module: Module,
    pub action: Action,
    pub id: PermissionId,
}

impl PermissionEntry {
    pub const fn new(module: Module, action: Action, id: i64) -> Self {
        Self {
            module,
            action,
            id: PermissionId(id),
        }
    }

    /// Canonical name, e.g. `sales:view`
    pub fn label(&self) -> String {
        format!("{}:{}", self.module.name(), self.action.name().to_lowercase())
    }
}
