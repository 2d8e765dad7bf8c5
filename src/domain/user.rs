// User records
//
// `User::roles` holds snapshots of roles taken at assignment time, permissions
// included. They are not refreshed when the role collection changes.

use super::{advance, Collection, Record, Role};
use crate::errors::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            _ => Err(AppError::Validation(format!("Invalid user status: {}", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<Role>,
    pub status: UserStatus,
    /// Carried through unchanged; no operation here records logins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

/// Partial update. `last_login` is deliberately absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    pub fn has_role(&self, role_id: &str) -> bool {
        self.roles.iter().any(|r| r.id == role_id)
    }
}

impl Record for User {
    const ENTITY: &'static str = "User";
    const COLLECTION: Collection = Collection::Users;

    type New = NewUser;
    type Patch = UserPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn create(id: String, new: NewUser, now: DateTime<Utc>) -> Self {
        Self {
            id,
            email: new.email,
            name: new.name,
            roles: new.roles,
            status: new.status,
            last_login: new.last_login,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: UserPatch, now: DateTime<Utc>) {
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(roles) = patch.roles {
            self.roles = roles;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = advance(self.updated_at, now);
    }
}

/// Copy the roles whose ids were selected, in the order of `available`.
pub fn snapshot_roles(available: &[Role], selected_ids: &[String]) -> Vec<Role> {
    available
        .iter()
        .filter(|r| selected_ids.iter().any(|id| id == &r.id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewRole;

    #[test]
    fn test_status_parsing() {
        assert_eq!("active".parse::<UserStatus>().unwrap(), UserStatus::Active);
        assert_eq!("Inactive".parse::<UserStatus>().unwrap(), UserStatus::Inactive);
        assert!("banned".parse::<UserStatus>().is_err());
    }

    #[test]
    fn test_new_user_defaults() {
        let new: NewUser =
            serde_json::from_str(r#"{"email":"a@example.com","name":"A"}"#).unwrap();
        assert_eq!(new.status, UserStatus::Active);
        assert!(new.roles.is_empty());
        assert!(new.last_login.is_none());
    }

    #[test]
    fn test_patch_preserves_last_login() {
        let now = Utc::now();
        let role = Role::create(
            "r1".to_string(),
            NewRole {
                name: "Admin".to_string(),
                description: String::new(),
                permissions: vec![],
            },
            now,
        );
        let mut user = User::create(
            "u1".to_string(),
            NewUser {
                email: "admin@example.com".to_string(),
                name: "Admin User".to_string(),
                roles: vec![role],
                status: UserStatus::Active,
                last_login: Some(now),
            },
            now,
        );

        user.apply(
            UserPatch {
                status: Some(UserStatus::Inactive),
                roles: Some(vec![]),
                ..Default::default()
            },
            now,
        );

        assert!(!user.is_active());
        assert!(!user.has_role("r1"));
        assert_eq!(user.last_login, Some(now));
        assert!(user.updated_at > now);
    }
}
