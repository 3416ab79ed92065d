use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use scope_admin::config::Config;
use scope_admin::views::Route;

mod cli;

#[derive(Parser)]
#[command(name = "scope-admin")]
#[command(about = "Manage the system scopes of an OpenID Connect server")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.scope-admin/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Server base URL, overrides `server.base_url` from the config
    #[arg(short, long, global = true)]
    server: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the scope admin window (default)
    Gui {
        /// Screen to open on, e.g. "admin/scope/new" or "admin/scope/12"
        #[arg(long)]
        route: Option<String>,
    },

    /// List the system scopes
    List {
        /// Only scopes granted to new clients by default
        #[arg(long = "default")]
        default_only: bool,

        /// Only scopes dynamically registered clients may request
        #[arg(long = "dyn-reg")]
        dyn_reg_only: bool,
    },

    /// Show one scope by its value
    Show {
        /// Scope value, e.g. "openid"
        value: String,
    },

    /// Create a new system scope
    Create {
        /// Scope value, e.g. "read_profile"
        value: String,

        #[arg(short, long)]
        description: Option<String>,

        /// Icon name, e.g. "star"
        #[arg(short, long)]
        icon: Option<String>,

        /// Grant to new clients by default
        #[arg(long = "default")]
        default_scope: bool,

        /// Allow dynamically registered clients to request the scope
        #[arg(long = "dyn-reg")]
        allow_dyn_reg: bool,

        /// Make the scope structured, with this parameter description
        #[arg(long)]
        structured: Option<String>,
    },

    /// Delete a system scope by id
    Delete {
        id: u64,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Write a default config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    if let Some(Commands::Init { force }) = cli.command {
        return cli::init::init_command(cli.config, force);
    }

    let config = Config::load(cli.config.as_deref())?.with_server(cli.server);

    match cli.command {
        None => scope_admin::gui::run_gui(config, Route::List)?,
        Some(Commands::Gui { route }) => {
            let start = cli::start_route(route.as_deref())?;
            scope_admin::gui::run_gui(config, start)?
        }
        Some(Commands::List {
            default_only,
            dyn_reg_only,
        }) => cli::list::list_command(&config, default_only, dyn_reg_only)?,
        Some(Commands::Show { value }) => cli::show::show_command(&config, &value)?,
        Some(Commands::Create {
            value,
            description,
            icon,
            default_scope,
            allow_dyn_reg,
            structured,
        }) => cli::create::create_command(
            &config,
            &value,
            cli::create::CreateOptions {
                description,
                icon,
                default_scope,
                allow_dyn_reg,
                structured_param: structured,
            },
        )?,
        Some(Commands::Delete { id, yes }) => cli::delete::delete_command(&config, id, yes)?,
        Some(Commands::Init { .. }) => {}
    }

    Ok(())
}
