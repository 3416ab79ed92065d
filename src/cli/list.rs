//! List command implementation

use anyhow::Result;

use scope_admin::api::ScopeApi;
use scope_admin::config::Config;
use scope_admin::store::ScopeStore;

use super::{client, remote_error, summary_line};

/// Print the system scopes, optionally narrowed to the default and/or dyn-reg subsets
pub fn list_command(config: &Config, default_only: bool, dyn_reg_only: bool) -> Result<()> {
    let records = client(config).list().map_err(remote_error)?;
    let store = ScopeStore::from_records(records);

    let scopes: Vec<_> = match (default_only, dyn_reg_only) {
        (true, true) => store.default_dyn_reg_subset().iter().cloned().collect(),
        (true, false) => store.default_subset().iter().cloned().collect(),
        (false, true) => store.dyn_reg_subset().iter().cloned().collect(),
        (false, false) => store.iter().cloned().collect(),
    };

    if scopes.is_empty() {
        println!("No system scopes found.");
        return Ok(());
    }

    println!("System scopes ({}):\n", scopes.len());
    for scope in scopes {
        scope.with(|record| {
            println!("  {}", summary_line(record));
            if let Some(desc) = &record.description {
                println!("    {}", desc);
            }
        });
    }

    Ok(())
}
