// User operations

use super::AdminApi;
use crate::domain::{ApiResponse, NewUser, User, UserPatch};
use crate::errors::Result;
use tracing::instrument;

impl AdminApi {
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<ApiResponse<Vec<User>>> {
        let users = self.list_records::<User>().await?;
        Ok(ApiResponse::ok(users, "Users fetched successfully"))
    }

    #[instrument(skip(self, new), fields(email = %new.email, roles = new.roles.len()))]
    pub async fn create_user(&self, new: NewUser) -> Result<ApiResponse<User>> {
        let user = self.create_record::<User>(new).await?;
        Ok(ApiResponse::ok(user, "User created successfully"))
    }

    #[instrument(skip(self, patch))]
    pub async fn update_user(&self, id: &str, patch: UserPatch) -> Result<ApiResponse<User>> {
        let user = self.update_record::<User>(id, patch).await?;
        Ok(ApiResponse::ok(user, "User updated successfully"))
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str) -> Result<ApiResponse<()>> {
        self.delete_record::<User>(id).await?;
        Ok(ApiResponse::ok((), "User deleted successfully"))
    }
}
