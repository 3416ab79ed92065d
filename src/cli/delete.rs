//! Delete command implementation

use std::io::{self, BufRead, Write};

use anyhow::Result;

use scope_admin::ScopeId;
use scope_admin::api::ScopeApi;
use scope_admin::config::Config;
use scope_admin::views::DELETE_CONFIRMATION;

use super::{client, remote_error, summary_line};

/// Delete a system scope, asking first unless `yes` is set
pub fn delete_command(config: &Config, id: ScopeId, yes: bool) -> Result<()> {
    let api = client(config);
    let scope = api.get(id).map_err(remote_error)?;

    if !yes {
        println!("{}", summary_line(&scope));
        print!("{} [y/N] ", DELETE_CONFIRMATION);
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        if !is_yes(&answer) {
            println!("Aborted.");
            return Ok(());
        }
    }

    api.delete(id).map_err(remote_error)?;
    println!("Deleted: {}", scope.value);

    Ok(())
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
