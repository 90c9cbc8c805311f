//! armory - command-line client for the base-logistics backend.
//!
//! Wires the session manager, route guard and API gateway together with a
//! file-backed session store, and exposes them as subcommands.

mod cli;
mod commands;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let app = session::App::build(&cli.config)?;

    match cli.command {
        Commands::Login(args) => commands::login::run(&app, args).await,
        Commands::DemoLogin(args) => commands::demo::login(&app, args).await,
        Commands::DemoUsers(args) => commands::demo::users(&app, args),
        Commands::Logout(args) => commands::logout::run(&app, args),
        Commands::Whoami(args) => commands::whoami::run(&app, args),
        Commands::Routes(args) => commands::routes::list(&app, args),
        Commands::Navigate(args) => commands::routes::navigate(&app, args),
        Commands::Get(args) => commands::get::run(&app, args).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so command output stays pipeable.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
