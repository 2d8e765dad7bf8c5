// Role records
//
// `Role::permissions` is a copy-on-assign snapshot: the permissions are cloned
// into the role when it is saved and are never refreshed from the permission
// collection afterwards. Editing or deleting a permission leaves existing roles
// untouched.

use super::{advance, Collection, Permission, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: String,
    pub permissions: Vec<Permission>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRole {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// Partial update; a `Some` permission list replaces the embedded one wholesale
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RolePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<Permission>>,
}

impl Role {
    pub fn has_permission(&self, permission_id: &str) -> bool {
        self.permissions.iter().any(|p| p.id == permission_id)
    }
}

impl Record for Role {
    const ENTITY: &'static str = "Role";
    const COLLECTION: Collection = Collection::Roles;

    type New = NewRole;
    type Patch = RolePatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn create(id: String, new: NewRole, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            permissions: new.permissions,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: RolePatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(permissions) = patch.permissions {
            self.permissions = permissions;
        }
        self.updated_at = advance(self.updated_at, now);
    }
}

/// Copy the permissions whose ids were selected, in the order of `available`.
/// Unknown ids are ignored.
pub fn snapshot_permissions(available: &[Permission], selected_ids: &[String]) -> Vec<Permission> {
    available
        .iter()
        .filter(|p| selected_ids.iter().any(|id| id == &p.id))
        .cloned()
        .collect()
}
