//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use armory_core::ApiUrl;

use crate::commands::{
    demo::{DemoLoginArgs, DemoUsersArgs},
    get::GetArgs,
    login::LoginArgs,
    logout::LogoutArgs,
    routes::{NavigateArgs, RoutesArgs},
    whoami::WhoamiArgs,
};

/// Default REST backend.
pub const DEFAULT_API_URL: &str = "https://military-asset-backend.onrender.com/api";

/// Command-line client for the base-logistics backend.
#[derive(Parser, Debug)]
#[command(name = "armory")]
#[command(author, version = env!("ARMORY_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub config: Config,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the client talks to and where it keeps its session.
#[derive(Args, Debug, Clone)]
pub struct Config {
    /// REST backend base URL
    #[arg(long, env = "ARMORY_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: ApiUrl,

    /// Authentication backend used by `login`
    #[arg(long, env = "ARMORY_BACKEND", value_enum, default_value_t = Backend::Http, global = true)]
    pub backend: Backend,

    /// Session file (defaults to the platform data directory)
    #[arg(long, env = "ARMORY_SESSION_FILE", global = true)]
    pub session_file: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// The REST backend at --api-url
    Http,
    /// The built-in demo accounts
    Demo,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with a username and password
    Login(LoginArgs),

    /// Sign in as one of the demo identities
    DemoLogin(DemoLoginArgs),

    /// List the demo identities
    DemoUsers(DemoUsersArgs),

    /// Sign out and forget the stored session
    Logout(LogoutArgs),

    /// Display the signed-in user
    Whoami(WhoamiArgs),

    /// List the client routes and whether the current user may open them
    Routes(RoutesArgs),

    /// Show what the route guard decides for a path
    Navigate(NavigateArgs),

    /// Fetch a backend resource as the signed-in user
    Get(GetArgs),
}
