//! Role Model

use std::fmt;

/// Backend role identifier
pub type RoleId = i64;

/// Built-in roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Manager,
    User,
    Employee,
}

/// Role table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleDef {
    pub role: Role,
    pub id: RoleId,
    pub name: &'static str,
    /// Elevated roles are granted every permission in the catalog,
    /// whatever their module permissions say
    pub elevated: bool,
}

impl RoleDef {
    const fn new(role: Role, id: RoleId, name: &'static str, elevated: bool) -> Self {
        Self {
            role,
            id,
            name,
            elevated,
        }
    }
}

const ROLES: &[RoleDef] = &[
    RoleDef::new(Role::Admin, 1, "Admin", true),
    RoleDef::new(Role::Manager, 2, "Manager", true),
    RoleDef::new(Role::User, 3, "User", false),
    RoleDef::new(Role::Employee, 4, "Employee", false),
];

impl Role {
    /// Every role definition, in id order
    pub fn all() -> &'static [RoleDef] {
        ROLES
    }

    /// Resolve a role by its exact (case-sensitive) name
    pub fn from_name(name: &str) -> Option<Role> {
        ROLES.iter().find(|d| d.name == name).map(|d| d.role)
    }

    pub fn from_id(id: RoleId) -> Option<Role> {
        ROLES.iter().find(|d| d.id == id).map(|d| d.role)
    }

    pub fn def(&self) -> &'static RoleDef {
        // ROLES holds one row per variant
        match self {
            Self::Admin => &ROLES[0],
            Self::Manager => &ROLES[1],
            Self::User => &ROLES[2],
            Self::Employee => &ROLES[3],
        }
    }

    pub fn id(&self) -> RoleId {
        self.def().id
    }

    pub fn name(&self) -> &'static str {
        self.def().name
    }

    pub fn is_elevated(&self) -> bool {
        self.def().elevated
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
