//! CLI command implementations

pub mod create;
pub mod delete;
pub mod init;
pub mod list;
pub mod show;

use scope_admin::ScopeRecord;
use scope_admin::api::{ApiError, ScopeClient};
use scope_admin::config::Config;
use scope_admin::views::{RemoteAlert, Route};

/// Client for the configured server
pub fn client(config: &Config) -> ScopeClient {
    ScopeClient::from_settings(&config.server)
}

/// Turn a failed remote call into the same text the GUI alert shows
pub fn remote_error(err: ApiError) -> anyhow::Error {
    let alert = RemoteAlert::from_error(&err);
    anyhow::anyhow!("{}: {}", alert.title, alert.body)
}

/// Screen the GUI opens on; the scope list unless `--route` names another
pub fn start_route(path: Option<&str>) -> anyhow::Result<Route> {
    match path {
        None => Ok(Route::List),
        Some(path) => Route::parse(path).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown route: {} (expected admin/scope, admin/scope/new or admin/scope/<id>)",
                path
            )
        }),
    }
}

/// One-line summary of a scope, shared by `list` and `show`
pub fn summary_line(scope: &ScopeRecord) -> String {
    let mut flags = Vec::new();
    if scope.default_scope {
        flags.push("default");
    }
    if scope.allow_dyn_reg {
        flags.push("dyn-reg");
    }
    if scope.structured {
        flags.push("structured");
    }

    let id = scope
        .id
        .map(|id| format!("#{}", id))
        .unwrap_or_else(|| "#-".to_string());
    if flags.is_empty() {
        format!("{} {}", id, scope.value)
    } else {
        format!("{} {} [{}]", id, scope.value, flags.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line_flags() {
        let scope = ScopeRecord {
            id: Some(4),
            value: "openid".to_string(),
            default_scope: true,
            allow_dyn_reg: true,
            ..ScopeRecord::default()
        };
        assert_eq!(summary_line(&scope), "#4 openid [default, dyn-reg]");
        assert_eq!(summary_line(&ScopeRecord::new("email")), "#- email");
    }

    #[test]
    fn test_start_route() {
        assert_eq!(start_route(None).unwrap(), Route::List);
        assert_eq!(start_route(Some("admin/scope/new")).unwrap(), Route::New);
        assert_eq!(start_route(Some("#/admin/scope/12")).unwrap(), Route::Edit(12));
        assert!(start_route(Some("admin/clients")).is_err());
    }
}
