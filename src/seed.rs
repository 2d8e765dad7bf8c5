// Bootstrap dataset written into empty collections on first access

use crate::domain::{Permission, PermissionAction, Role, User, UserStatus};
use chrono::{DateTime, Utc};

/// The fixed initial records for all three collections.
///
/// Roles embed clones of entries from `permissions` and users embed clones of
/// entries from `roles`, so the set is consistent by construction.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub permissions: Vec<Permission>,
    pub roles: Vec<Role>,
    pub users: Vec<User>,
}

impl SeedData {
    /// Build the dataset with every timestamp set to `now`
    pub fn at(now: DateTime<Utc>) -> Self {
        let permissions = vec![
            permission("1", "Read Users", "Can view user details", "users", PermissionAction::Read),
            permission(
                "2",
                "Manage Users",
                "Can create, update and delete users",
                "users",
                PermissionAction::Manage,
            ),
            permission("3", "Read Roles", "Can view role details", "roles", PermissionAction::Read),
            permission(
                "4",
                "Manage Roles",
                "Can create, update and delete roles",
                "roles",
                PermissionAction::Manage,
            ),
        ];

        let roles = vec![
            Role {
                id: "1".to_string(),
                name: "Admin".to_string(),
                description: "Full system access".to_string(),
                permissions: permissions.clone(),
                created_at: now,
                updated_at: now,
            },
            Role {
                id: "2".to_string(),
                name: "User Manager".to_string(),
                description: "Can manage users".to_string(),
                permissions: vec![permissions[0].clone(), permissions[1].clone()],
                created_at: now,
                updated_at: now,
            },
        ];

        let users = vec![
            User {
                id: "1".to_string(),
                email: "admin@example.com".to_string(),
                name: "Admin User".to_string(),
                roles: vec![roles[0].clone()],
                status: UserStatus::Active,
                last_login: Some(now),
                created_at: now,
                updated_at: now,
            },
            User {
                id: "2".to_string(),
                email: "manager@example.com".to_string(),
                name: "User Manager".to_string(),
                roles: vec![roles[1].clone()],
                status: UserStatus::Active,
                last_login: Some(now),
                created_at: now,
                updated_at: now,
            },
        ];

        Self {
            permissions,
            roles,
            users,
        }
    }
}

fn permission(
    id: &str,
    name: &str,
    description: &str,
    resource: &str,
    action: PermissionAction,
) -> Permission {
    Permission {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        resource: resource.to_string(),
        action,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_counts() {
        let seed = SeedData::at(Utc::now());
        assert_eq!(seed.permissions.len(), 4);
        assert_eq!(seed.roles.len(), 2);
        assert_eq!(seed.users.len(), 2);

        let on_users = seed.permissions.iter().filter(|p| p.resource == "users").count();
        let on_roles = seed.permissions.iter().filter(|p| p.resource == "roles").count();
        assert_eq!((on_users, on_roles), (2, 2));
    }

    #[test]
    fn test_seed_is_internally_consistent() {
        let seed = SeedData::at(Utc::now());

        for role in &seed.roles {
            assert!(!role.permissions.is_empty());
            for embedded in &role.permissions {
                assert!(seed.permissions.contains(embedded));
            }
        }
        for user in &seed.users {
            assert!(!user.roles.is_empty());
            for embedded in &user.roles {
                assert!(seed.roles.contains(embedded));
            }
        }
    }

    #[test]
    fn test_role_permission_assignment() {
        let seed = SeedData::at(Utc::now());
        assert_eq!(seed.roles[0].permissions.len(), 4);

        let manager: Vec<&str> = seed.roles[1].permissions.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(manager, vec!["1", "2"]);

        assert!(seed.users[0].has_role("1"));
        assert!(seed.users[1].has_role("2"));
    }
}
