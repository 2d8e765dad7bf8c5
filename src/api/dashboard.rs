// Summary counts for the dashboard landing view

use super::AdminApi;
use crate::domain::ApiResponse;
use crate::errors::Result;
use serde::{Deserialize, Serialize};
use tracing::instrument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: usize,
    pub active_users: usize,
    pub roles: usize,
    pub permissions: usize,
}

impl AdminApi {
    /// Built from the three list operations, so it seeds empty collections too
    #[instrument(skip(self))]
    pub async fn dashboard_stats(&self) -> Result<ApiResponse<DashboardStats>> {
        let users = self.list_users().await?.data;
        let roles = self.list_roles().await?.data;
        let permissions = self.list_permissions().await?.data;

        let stats = DashboardStats {
            total_users: users.len(),
            active_users: users.iter().filter(|u| u.is_active()).count(),
            roles: roles.len(),
            permissions: permissions.len(),
        };
        Ok(ApiResponse::ok(stats, "Dashboard stats fetched successfully"))
    }
}
