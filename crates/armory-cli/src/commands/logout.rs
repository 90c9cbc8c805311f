//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use crate::output;
use crate::session::App;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub fn run(app: &App, _args: LogoutArgs) -> Result<()> {
    let was_signed_in = app.session.is_authenticated();
    app.session.logout();

    if was_signed_in {
        output::success("Logged out");
    } else {
        output::success("No active session");
    }

    Ok(())
}
