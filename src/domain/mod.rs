pub mod envelope;
pub mod permission;
pub mod role;
pub mod user;
pub mod validation;

pub use envelope::ApiResponse;
pub use permission::{NewPermission, Permission, PermissionAction, PermissionPatch};
pub use role::{snapshot_permissions, NewRole, Role, RolePatch};
pub use user::{snapshot_roles, NewUser, User, UserPatch, UserStatus};

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// The three record collections owned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Roles,
    Permissions,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Users, Collection::Roles, Collection::Permissions];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Roles => "roles",
            Collection::Permissions => "permissions",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record stored in one of the collections.
///
/// `create` builds a record from its creation fields and `apply` performs the
/// shallow merge of a patch, stamping `updatedAt` where the entity has one.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const ENTITY: &'static str;
    const COLLECTION: Collection;

    type New: Send;
    type Patch: Send;

    fn id(&self) -> &str;
    fn create(id: String, new: Self::New, now: DateTime<Utc>) -> Self;
    fn apply(&mut self, patch: Self::Patch, now: DateTime<Utc>);
}

/// Next `updatedAt` value; always strictly after `previous`.
pub(crate) fn advance(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}
