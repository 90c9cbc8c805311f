//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session::App;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub fn run(app: &App, _args: WhoamiArgs) -> Result<()> {
    let user = app
        .session
        .current_user()
        .context("No active session. Run 'armory login' first.")?;

    output::profile(&user);
    output::field("Session", &app.store.path().display().to_string());

    Ok(())
}
