use super::{
    Command, PermissionArgs, PermissionCommand, PermissionUpdateArgs, RoleArgs, RoleCommand,
    RoleUpdateArgs, UserArgs, UserCommand, UserUpdateArgs,
};
use crate::api::AdminApi;
use crate::config::ObservabilityConfig;
use crate::domain::validation::FormValidator;
use crate::domain::{
    snapshot_permissions, snapshot_roles, NewPermission, NewRole, NewUser, PermissionPatch,
    RolePatch, UserPatch,
};
use crate::errors::{AppError, Result};
use crate::observability::{HealthChecker, MetricsRecorder};
use serde::Serialize;

/// Run one command and render its result for stdout
pub async fn execute(
    api: &AdminApi,
    command: Command,
    observability: &ObservabilityConfig,
) -> Result<String> {
    match command {
        Command::Users { action } => users(api, action).await,
        Command::Roles { action } => roles(api, action).await,
        Command::Permissions { action } => permissions(api, action).await,
        Command::Dashboard => render(&api.dashboard_stats().await?),
        Command::Reset => render(&api.reset().await?),
        Command::Health => {
            let checker = HealthChecker::new(api.store().backend().clone());
            let status = checker.readiness().await;
            if status.status != "ok" {
                tracing::warn!(status = %status.status, "Store health check failed");
            }
            render(&status)
        }
        Command::Metrics => {
            if !observability.metrics_enabled {
                return Err(AppError::Configuration("Metrics are disabled".to_string()));
            }
            api.store().refresh_record_counts().await?;
            MetricsRecorder::export().map_err(|e| AppError::Internal(e.to_string()))
        }
    }
}

async fn users(api: &AdminApi, action: UserCommand) -> Result<String> {
    match action {
        UserCommand::List => render(&api.list_users().await?),
        UserCommand::Create(args) => {
            let new = new_user(api, args).await?;
            FormValidator::validate_new_user(&new).into_result()?;
            render(&api.create_user(new).await?)
        }
        UserCommand::Update { id, fields } => {
            let patch = user_patch(api, fields).await?;
            FormValidator::validate_user_patch(&patch).into_result()?;
            render(&api.update_user(&id, patch).await?)
        }
        UserCommand::Delete { id } => render(&api.delete_user(&id).await?),
    }
}

async fn roles(api: &AdminApi, action: RoleCommand) -> Result<String> {
    match action {
        RoleCommand::List => render(&api.list_roles().await?),
        RoleCommand::Create(args) => {
            let new = new_role(api, args).await?;
            FormValidator::validate_new_role(&new).into_result()?;
            render(&api.create_role(new).await?)
        }
        RoleCommand::Update { id, fields } => {
            let patch = role_patch(api, fields).await?;
            FormValidator::validate_role_patch(&patch).into_result()?;
            render(&api.update_role(&id, patch).await?)
        }
        RoleCommand::Delete { id } => render(&api.delete_role(&id).await?),
    }
}

async fn permissions(api: &AdminApi, action: PermissionCommand) -> Result<String> {
    match action {
        PermissionCommand::List => render(&api.list_permissions().await?),
        PermissionCommand::Create(args) => {
            let new = new_permission(args);
            FormValidator::validate_new_permission(&new).into_result()?;
            render(&api.create_permission(new).await?)
        }
        PermissionCommand::Update { id, fields } => {
            let patch = permission_patch(fields);
            FormValidator::validate_permission_patch(&patch).into_result()?;
            render(&api.update_permission(&id, patch).await?)
        }
        PermissionCommand::Delete { id } => render(&api.delete_permission(&id).await?),
    }
}

async fn new_user(api: &AdminApi, args: UserArgs) -> Result<NewUser> {
    let available = api.list_roles().await?.data;
    Ok(NewUser {
        email: args.email,
        name: args.name,
        roles: snapshot_roles(&available, &args.roles),
        status: args.status,
        last_login: None,
    })
}

async fn user_patch(api: &AdminApi, args: UserUpdateArgs) -> Result<UserPatch> {
    let roles = if args.roles.is_empty() {
        None
    } else {
        let available = api.list_roles().await?.data;
        Some(snapshot_roles(&available, &args.roles))
    };
    Ok(UserPatch {
        email: args.email,
        name: args.name,
        roles,
        status: args.status,
    })
}

async fn new_role(api: &AdminApi, args: RoleArgs) -> Result<NewRole> {
    let available = api.list_permissions().await?.data;
    Ok(NewRole {
        name: args.name,
        description: args.description,
        permissions: snapshot_permissions(&available, &args.permissions),
    })
}

async fn role_patch(api: &AdminApi, args: RoleUpdateArgs) -> Result<RolePatch> {
    let permissions = if args.permissions.is_empty() {
        None
    } else {
        let available = api.list_permissions().await?.data;
        Some(snapshot_permissions(&available, &args.permissions))
    };
    Ok(RolePatch {
        name: args.name,
        description: args.description,
        permissions,
    })
}

fn new_permission(args: PermissionArgs) -> NewPermission {
    NewPermission {
        name: args.name,
        description: args.description,
        resource: args.resource,
        action: args.action,
    }
}

fn permission_patch(args: PermissionUpdateArgs) -> PermissionPatch {
    PermissionPatch {
        name: args.name,
        description: args.description,
        resource: args.resource,
        action: args.action,
    }
}

fn render<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::api_with_clock;
    use crate::cli::Cli;
    use crate::clock::SystemClock;
    use crate::store::FileStore;
    use clap::Parser;
    use serde_json::Value;
    use std::path::Path;
    use std::sync::Arc;

    async fn run(api: &AdminApi, args: &[&str]) -> Result<Value> {
        let mut argv = vec!["rbac-admin"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).expect("valid arguments");
        let output = execute(api, cli.command, &ObservabilityConfig::default()).await?;
        Ok(serde_json::from_str(&output).expect("json output"))
    }

    async fn file_api(dir: &Path) -> AdminApi {
        let backend = FileStore::open(dir).await.unwrap();
        AdminApi::with_backend(Arc::new(backend), "rbac:", Arc::new(SystemClock))
    }

    #[tokio::test]
    async fn test_create_permission_command() {
        let (api, _, _) = api_with_clock();
        let output = run(
            &api,
            &[
                "permissions",
                "create",
                "--name",
                "Delete Users",
                "--description",
                "Can delete users",
                "--resource",
                "users",
                "--action",
                "delete",
            ],
        )
        .await
        .unwrap();

        assert_eq!(output["success"], true);
        assert_eq!(output["data"]["action"], "delete");

        let listed = run(&api, &["permissions", "list"]).await.unwrap();
        assert_eq!(listed["data"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_role_create_embeds_selected_permissions() {
        let (api, _, _) = api_with_clock();
        let output = run(
            &api,
            &["roles", "create", "--name", "Viewer", "--permission", "3", "--permission", "1"],
        )
        .await
        .unwrap();

        let ids: Vec<&str> = output["data"]["permissions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_role_without_known_permissions_is_rejected() {
        let (api, _, _) = api_with_clock();
        let err = run(
            &api,
            &["roles", "create", "--name", "Empty", "--permission", "999"],
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), "validation");
        assert_eq!(api.list_roles().await.unwrap().data.len(), 2);
    }

    #[tokio::test]
    async fn test_user_create_validates_email() {
        let (api, _, _) = api_with_clock();
        let err = run(
            &api,
            &["users", "create", "--email", "nope", "--name", "Nope", "--role", "1"],
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Invalid email address"));
    }

    #[tokio::test]
    async fn test_update_missing_user_reports_not_found() {
        let (api, _, _) = api_with_clock();
        let err = run(&api, &["users", "update", "zzz", "--name", "Someone"])
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_dashboard_and_health() {
        let (api, _, _) = api_with_clock();

        let stats = run(&api, &["dashboard"]).await.unwrap();
        assert_eq!(stats["data"]["totalUsers"], 2);
        assert_eq!(stats["data"]["permissions"], 4);

        let health = run(&api, &["health"]).await.unwrap();
        assert_eq!(health["status"], "ok");
        assert_eq!(health["checks"]["store"]["backend"], "memory");
    }

    #[tokio::test]
    async fn test_metrics_respects_config() {
        let (api, _, _) = api_with_clock();
        let disabled = ObservabilityConfig {
            metrics_enabled: false,
            ..ObservabilityConfig::default()
        };
        let err = execute(&api, Command::Metrics, &disabled).await.unwrap_err();
        assert_eq!(err.kind(), "configuration");

        let text = execute(&api, Command::Metrics, &ObservabilityConfig::default())
            .await
            .unwrap();
        assert!(text.contains("rbac_records{collection=\"permissions\"}"));
    }

    #[tokio::test]
    async fn test_changes_persist_across_file_store_instances() {
        let dir = tempfile::tempdir().unwrap();

        let first = file_api(dir.path()).await;
        run(
            &first,
            &[
                "permissions",
                "create",
                "--name",
                "Delete Users",
                "--description",
                "Can delete users",
                "--resource",
                "users",
                "--action",
                "delete",
            ],
        )
        .await
        .unwrap();
        drop(first);

        let second = file_api(dir.path()).await;
        let listed = run(&second, &["permissions", "list"]).await.unwrap();
        let permissions = listed["data"].as_array().unwrap();
        assert_eq!(permissions.len(), 5);
        assert_eq!(permissions[4]["name"], "Delete Users");
    }
}
