pub mod auth;
pub mod report;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::services::dashboard::{self, Action, DashboardState};
use crate::services::{ApiClient, FetchKind, SessionStore};

/// Admin dashboard for the DishHub food-ordering platform
#[derive(Parser)]
#[command(name = "dishhub-admin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Override rows per page in the registered-users table
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    page_size: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive TUI (default)
    Tui,

    /// Show total food items and users
    Overview {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show food-item counts per category
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show user sign-ups per month
    Users {
        /// Ask the server for one month only (1-12)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List registered users, one page at a time
    Registered {
        /// Page to show (clamped to the last page)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log in as an administrator
    Login(auth::LoginArgs),

    /// Create an administrator account
    SignUp(auth::SignUpArgs),

    /// Forget the stored session
    Logout,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<Config> {
        let config = Config::load(self.config.as_deref())?;
        let page_size = self.page_size.map(|n| n as usize);
        Ok(config.with_overrides(self.base_url.clone(), page_size)?)
    }

    pub fn run(self) -> anyhow::Result<()> {
        let config = self.load_config()?;

        match self.command {
            None | Some(Commands::Tui) => crate::tui::run(client_for(&config)?),
            Some(Commands::Overview { json }) => {
                let state = fetch_once(&config, FetchKind::Overview, None)?;
                report::print(json, &report::OverviewReport::from_state(&state))
            }
            Some(Commands::Categories { json }) => {
                let state = fetch_once(&config, FetchKind::Categories, None)?;
                report::print(json, &report::CategoriesReport::from_state(&state))
            }
            Some(Commands::Users { month, json }) => {
                let state = fetch_once(&config, FetchKind::Users, month)?;
                report::print(json, &report::UsersReport::from_state(&state))
            }
            Some(Commands::Registered { page, json }) => {
                let mut state = fetch_once(&config, FetchKind::Registered, None)?;
                state.registered.seek(page);
                report::print(json, &report::RegisteredReport::from_state(&state))
            }
            Some(Commands::Login(args)) => {
                crate::logging::init_stderr();
                args.run(&config)
            }
            Some(Commands::SignUp(args)) => {
                crate::logging::init_stderr();
                args.run(&config)
            }
            Some(Commands::Logout) => {
                let store = SessionStore::new()?;
                if store.clear()? {
                    println!("Logged out.");
                } else {
                    println!("No active session.");
                }
                Ok(())
            }
        }
    }
}

/// Tokio runtime for one-shot commands
pub(crate) fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}

/// Client carrying the stored session token, if any
pub(crate) fn client_for(config: &Config) -> anyhow::Result<ApiClient> {
    let token = SessionStore::new()
        .ok()
        .and_then(|store| store.load().ok().flatten())
        .and_then(|session| session.token);
    Ok(ApiClient::new(config.clone())?.with_token(token))
}

/// Run a single feed through the dashboard state and return the result.
/// Fetch failures are reported on stderr and leave the fallback in place.
fn fetch_once(
    config: &Config,
    kind: FetchKind,
    month: Option<u32>,
) -> anyhow::Result<DashboardState> {
    crate::logging::init_stderr();

    let client = client_for(config)?;
    let mut state = DashboardState::new(config.page_size, config.timezone);
    let requests = match kind {
        FetchKind::Users => state.update(Action::SetMonthFilter(month)),
        other => state.update(Action::Reload(other)),
    };

    let rt = runtime()?;
    for request in requests {
        let action = rt.block_on(dashboard::execute(&client, request));
        state.update(action);
    }

    if let Some(err) = state.status(kind).error() {
        eprintln!("[dishhub-admin] Warning: {} unavailable: {}", kind.label(), err);
    }

    Ok(state)
}
