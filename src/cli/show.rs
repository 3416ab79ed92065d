//! Show command implementation

use anyhow::{Result, anyhow};

use scope_admin::api::ScopeApi;
use scope_admin::config::Config;
use scope_admin::store::ScopeStore;

use super::{client, remote_error, summary_line};

/// Print every field of the scope with the given value
pub fn show_command(config: &Config, value: &str) -> Result<()> {
    let records = client(config).list().map_err(remote_error)?;
    let store = ScopeStore::from_records(records);
    let scope = store.find_by_value(value).map_err(|e| anyhow!(e))?;

    let record = scope.snapshot();
    println!("{}\n", summary_line(&record));
    println!("  Description: {}", record.description.as_deref().unwrap_or("-"));
    println!("  Icon:        {}", record.icon_name().unwrap_or("-"));
    println!("  Default:     {}", record.default_scope);
    println!("  Dyn reg:     {}", record.allow_dyn_reg);
    println!("  Structured:  {}", record.structured);
    if record.structured {
        println!(
            "  Parameter:   {}",
            record.structured_param_description.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
