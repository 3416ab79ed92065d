//! Create command implementation

use anyhow::{Result, bail};
use tracing::info;

use scope_admin::ScopeRecord;
use scope_admin::api::ScopeApi;
use scope_admin::config::Config;
use scope_admin::views::is_known_icon;

use super::{client, remote_error, summary_line};

/// Options for a new scope, straight from the command line
#[derive(Debug, Default)]
pub struct CreateOptions {
    pub description: Option<String>,
    pub icon: Option<String>,
    pub default_scope: bool,
    pub allow_dyn_reg: bool,
    pub structured_param: Option<String>,
}

impl CreateOptions {
    /// Build the unsaved record for `value`
    pub fn into_record(self, value: &str) -> ScopeRecord {
        ScopeRecord {
            value: value.trim().to_string(),
            description: self.description,
            icon: self.icon,
            default_scope: self.default_scope,
            allow_dyn_reg: self.allow_dyn_reg,
            structured: self.structured_param.is_some(),
            structured_param_description: self.structured_param,
            ..ScopeRecord::default()
        }
    }
}

/// Create a new system scope
pub fn create_command(config: &Config, value: &str, options: CreateOptions) -> Result<()> {
    let record = options.into_record(value);
    if !record.has_valid_value() {
        bail!("Scope value must not be blank");
    }
    if let Some(icon) = record.icon_name() {
        if !is_known_icon(icon) {
            bail!("Unknown icon: {}", icon);
        }
    }

    let saved = client(config).save(&record).map_err(remote_error)?;
    info!("Created scope {:?}", saved.id);
    println!("Created: {}", summary_line(&saved));

    Ok(())
}
