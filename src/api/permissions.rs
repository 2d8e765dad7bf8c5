// Permission operations

use super::AdminApi;
use crate::domain::{ApiResponse, NewPermission, Permission, PermissionPatch};
use crate::errors::Result;
use tracing::instrument;

impl AdminApi {
    #[instrument(skip(self))]
    pub async fn list_permissions(&self) -> Result<ApiResponse<Vec<Permission>>> {
        let permissions = self.list_records::<Permission>().await?;
        Ok(ApiResponse::ok(permissions, "Permissions fetched successfully"))
    }

    #[instrument(skip(self, new), fields(name = %new.name, resource = %new.resource, action = %new.action))]
    pub async fn create_permission(&self, new: NewPermission) -> Result<ApiResponse<Permission>> {
        let permission = self.create_record::<Permission>(new).await?;
        Ok(ApiResponse::ok(permission, "Permission created successfully"))
    }

    /// Roles that embedded this permission keep their old copy
    #[instrument(skip(self, patch))]
    pub async fn update_permission(
        &self,
        id: &str,
        patch: PermissionPatch,
    ) -> Result<ApiResponse<Permission>> {
        let permission = self.update_record::<Permission>(id, patch).await?;
        Ok(ApiResponse::ok(permission, "Permission updated successfully"))
    }

    /// Idempotent; roles that embedded the permission are not changed
    #[instrument(skip(self))]
    pub async fn delete_permission(&self, id: &str) -> Result<ApiResponse<()>> {
        self.delete_record::<Permission>(id).await?;
        Ok(ApiResponse::ok((), "Permission deleted successfully"))
    }
}
