//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::output;
use crate::session::App;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account username
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long, env = "ARMORY_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(app: &App, args: LoginArgs) -> Result<()> {
    eprintln!("{}", "Logging in...".dimmed());

    let user = app
        .session
        .login(&args.username, &args.password)
        .await
        .context("Login failed")?;

    output::success("Logged in successfully");
    println!();
    output::profile(&user);

    Ok(())
}
