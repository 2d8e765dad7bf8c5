// Role operations

use super::AdminApi;
use crate::domain::{ApiResponse, NewRole, Role, RolePatch};
use crate::errors::Result;
use tracing::instrument;

impl AdminApi {
    #[instrument(skip(self))]
    pub async fn list_roles(&self) -> Result<ApiResponse<Vec<Role>>> {
        let roles = self.list_records::<Role>().await?;
        Ok(ApiResponse::ok(roles, "Roles fetched successfully"))
    }

    /// `new.permissions` is stored as given; an empty list is accepted here
    #[instrument(skip(self, new), fields(name = %new.name, permissions = new.permissions.len()))]
    pub async fn create_role(&self, new: NewRole) -> Result<ApiResponse<Role>> {
        let role = self.create_record::<Role>(new).await?;
        Ok(ApiResponse::ok(role, "Role created successfully"))
    }

    #[instrument(skip(self, patch))]
    pub async fn update_role(&self, id: &str, patch: RolePatch) -> Result<ApiResponse<Role>> {
        let role = self.update_record::<Role>(id, patch).await?;
        Ok(ApiResponse::ok(role, "Role updated successfully"))
    }

    /// Idempotent; users that embedded the role keep their copy
    #[instrument(skip(self))]
    pub async fn delete_role(&self, id: &str) -> Result<ApiResponse<()>> {
        self.delete_record::<Role>(id).await?;
        Ok(ApiResponse::ok((), "Role deleted successfully"))
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::api_with_clock;
    use crate::clock::Clock;
    use crate::domain::{snapshot_permissions, NewRole, RolePatch};
    use chrono::Duration;

    #[tokio::test]
    async fn test_create_role_stamps_timestamps() {
        let (api, clock, _) = api_with_clock();
        let permissions = api.list_permissions().await.unwrap().data;

        clock.advance(Duration::minutes(1));
        let created = api
            .create_role(NewRole {
                name: "Role Auditor".to_string(),
                description: "Reads roles".to_string(),
                permissions: snapshot_permissions(&permissions, &["3".to_string()]),
            })
            .await
            .unwrap();

        assert_eq!(created.message, "Role created successfully");
        let role = created.data;
        assert_eq!(role.created_at, clock.now());
        assert_eq!(role.updated_at, role.created_at);
        assert_eq!(role.permissions.len(), 1);

        let roles = api.list_roles().await.unwrap().data;
        assert_eq!(roles.len(), 3);
        assert!(roles.iter().any(|r| r.id == role.id));
    }

    #[tokio::test]
    async fn test_empty_update_only_advances_updated_at() {
        let (api, clock, _) = api_with_clock();
        let before = api.list_roles().await.unwrap().data[0].clone();

        clock.advance(Duration::seconds(30));
        let after = api
            .update_role(&before.id, RolePatch::default())
            .await
            .unwrap()
            .data;

        assert_eq!(after.id, before.id);
        assert_eq!(after.name, before.name);
        assert_eq!(after.description, before.description);
        assert_eq!(after.permissions, before.permissions);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
    }

    #[tokio::test]
    async fn test_update_advances_even_without_clock_movement() {
        let (api, _, _) = api_with_clock();
        let before = api.list_roles().await.unwrap().data[1].clone();

        let after = api
            .update_role(&before.id, RolePatch::default())
            .await
            .unwrap()
            .data;
        assert!(after.updated_at > before.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_role_is_not_found() {
        let (api, _, _) = api_with_clock();
        let before = api.list_roles().await.unwrap().data;

        let err = api
            .update_role(
                "does-not-exist",
                RolePatch {
                    name: Some("Ghost".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Role not found: does-not-exist");

        assert_eq!(api.list_roles().await.unwrap().data, before);
    }

    #[tokio::test]
    async fn test_delete_role_does_not_cascade_to_users() {
        let (api, _, _) = api_with_clock();

        let response = api.delete_role("2").await.unwrap();
        assert_eq!(response.message, "Role deleted successfully");

        let roles = api.list_roles().await.unwrap().data;
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].id, "1");

        let users = api.list_users().await.unwrap().data;
        let manager = users.iter().find(|u| u.id == "2").unwrap();
        assert!(manager.has_role("2"));
    }
}
