//! Company Access Model

use super::permission::{ModulePermissions, PermissionId};
use super::role::RoleId;
use serde::{Deserialize, Serialize};

/// Company identifier
pub type CompanyId = i64;

/// One company's access grant as the UI holds it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyAccess {
    pub company_id: CompanyId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<RoleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    #[serde(default)]
    pub module_permissions: ModulePermissions,
}

impl CompanyAccess {
    pub fn new(company_id: CompanyId) -> Self {
        Self {
            company_id,
            ..Default::default()
        }
    }

    pub fn with_role_id(mut self, role_id: RoleId) -> Self {
        self.role_id = Some(role_id);
        self
    }

    pub fn with_role_name(mut self, role_name: impl Into<String>) -> Self {
        self.role_name = Some(role_name.into());
        self
    }

    /// Grant `actions` on `module`, appending to any existing grant
    pub fn grant<I, S>(mut self, module: impl Into<String>, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.module_permissions
            .entry(module.into())
            .or_default()
            .extend(actions.into_iter().map(Into::into));
        self
    }
}

/// Outbound payload for one company access grant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedCompanyAccess {
    pub company_id: CompanyId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<RoleId>,
    pub permission_ids: Vec<PermissionId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_camel_case() {
        let access: CompanyAccess = serde_json::from_value(json!({
            "companyId": 7,
            "roleName": "User",
            "modulePermissions": { "sales": ["View"], "finance": ["Add", "Edit"] }
        }))
        .unwrap();

        assert_eq!(access.company_id, 7);
        assert_eq!(access.role_id, None);
        assert_eq!(access.role_name.as_deref(), Some("User"));
        let modules: Vec<&str> = access.module_permissions.keys().map(String::as_str).collect();
        assert_eq!(modules, ["sales", "finance"]);
    }

    #[test]
    fn test_missing_module_permissions_defaults_to_empty() {
        let access: CompanyAccess = serde_json::from_value(json!({ "companyId": 5 })).unwrap();
        assert!(access.module_permissions.is_empty());
    }

    #[test]
    fn test_normalized_omits_absent_role_id() {
        let normalized = NormalizedCompanyAccess {
            company_id: 3,
            role_id: None,
            permission_ids: vec![PermissionId(21)],
        };
        assert_eq!(
            serde_json::to_value(&normalized).unwrap(),
            json!({ "companyId": 3, "permissionIds": [21] })
        );
    }

    #[test]
    fn test_grant_appends() {
        let access = CompanyAccess::new(1)
            .grant("sales", ["View"])
            .grant("sales", ["Edit"]);
        assert_eq!(access.module_permissions["sales"], vec!["View", "Edit"]);
    }
}
