// Form-level validation for create/update input
//
// These rules belong to the editing surface, not to the store: the API layer
// accepts any well-typed record, including roles without permissions and users
// without roles. Consumers run the matching validator before submitting.

use super::{NewPermission, NewRole, NewUser, PermissionPatch, RolePatch, UserPatch};
use crate::errors::{AppError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum role description length accepted by the role form
pub const ROLE_DESCRIPTION_MAX_CHARS: usize = 100;

/// Outcome of validating one form submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValidationResult {
    pub errors: Vec<String>,
}

impl FormValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn check(&mut self, outcome: Option<String>) {
        if let Some(message) = outcome {
            self.errors.push(message);
        }
    }

    /// Collapse into a single validation error listing every failed rule
    pub fn into_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors.join("; ")))
        }
    }
}

pub struct FormValidator;

impl FormValidator {
    pub fn validate_new_permission(new: &NewPermission) -> FormValidationResult {
        debug!("Validating permission form");
        let mut result = FormValidationResult::default();
        result.check(Self::validate_required("Name", &new.name));
        result.check(Self::validate_required("Description", &new.description));
        result.check(Self::validate_required("Resource", &new.resource));
        result
    }

    pub fn validate_permission_patch(patch: &PermissionPatch) -> FormValidationResult {
        let mut result = FormValidationResult::default();
        if let Some(name) = &patch.name {
            result.check(Self::validate_required("Name", name));
        }
        if let Some(description) = &patch.description {
            result.check(Self::validate_required("Description", description));
        }
        if let Some(resource) = &patch.resource {
            result.check(Self::validate_required("Resource", resource));
        }
        result
    }

    pub fn validate_new_role(new: &NewRole) -> FormValidationResult {
        debug!("Validating role form");
        let mut result = FormValidationResult::default();
        result.check(Self::validate_required("Name", &new.name));
        result.check(Self::validate_role_description(&new.description));
        result.check(Self::validate_not_empty(
            new.permissions.len(),
            "At least one permission must be selected",
        ));
        result
    }

    pub fn validate_role_patch(patch: &RolePatch) -> FormValidationResult {
        let mut result = FormValidationResult::default();
        if let Some(name) = &patch.name {
            result.check(Self::validate_required("Name", name));
        }
        if let Some(description) = &patch.description {
            result.check(Self::validate_role_description(description));
        }
        if let Some(permissions) = &patch.permissions {
            result.check(Self::validate_not_empty(
                permissions.len(),
                "At least one permission must be selected",
            ));
        }
        result
    }

    pub fn validate_new_user(new: &NewUser) -> FormValidationResult {
        debug!("Validating user form");
        let mut result = FormValidationResult::default();
        result.check(Self::validate_required("Name", &new.name));
        result.check(Self::validate_email(&new.email));
        result.check(Self::validate_not_empty(
            new.roles.len(),
            "At least one role must be selected",
        ));
        result
    }

    pub fn validate_user_patch(patch: &UserPatch) -> FormValidationResult {
        let mut result = FormValidationResult::default();
        if let Some(name) = &patch.name {
            result.check(Self::validate_required("Name", name));
        }
        if let Some(email) = &patch.email {
            result.check(Self::validate_email(email));
        }
        if let Some(roles) = &patch.roles {
            result.check(Self::validate_not_empty(
                roles.len(),
                "At least one role must be selected",
            ));
        }
        result
    }

    /// Whitespace-only values count as missing
    pub fn validate_required(field: &str, value: &str) -> Option<String> {
        value
            .trim()
            .is_empty()
            .then(|| format!("{} is required", field))
    }

    pub fn validate_role_description(description: &str) -> Option<String> {
        (description.chars().count() > ROLE_DESCRIPTION_MAX_CHARS).then(|| {
            format!(
                "Description must be under {} characters",
                ROLE_DESCRIPTION_MAX_CHARS
            )
        })
    }

    /// Accepts `local@domain.tld` where the local part uses `[A-Za-z0-9._%+-]`,
    /// the domain `[A-Za-z0-9.-]`, and the top-level label is two or more letters.
    pub fn validate_email(email: &str) -> Option<String> {
        if email.trim().is_empty() {
            return Some("Email is required".to_string());
        }
        (!Self::is_email(email)).then(|| "Invalid email address".to_string())
    }

    fn is_email(email: &str) -> bool {
        let Some((local, domain)) = email.rsplit_once('@') else {
            return false;
        };
        if local.is_empty()
            || !local
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
        {
            return false;
        }

        let Some((host, tld)) = domain.rsplit_once('.') else {
            return false;
        };
        !host.is_empty()
            && host
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
            && tld.len() >= 2
            && tld.chars().all(|c| c.is_ascii_alphabetic())
    }

    fn validate_not_empty(len: usize, message: &str) -> Option<String> {
        (len == 0).then(|| message.to_string())
    }
}
