//! Demo login and the demo identity list.

use anyhow::{Context, Result};
use clap::Args;

use armory_core::DEMO_PASSWORD;

use crate::output;
use crate::session::App;

#[derive(Args, Debug)]
pub struct DemoLoginArgs {
    /// Demo identity to sign in as (see `armory demo-users`)
    pub identity: String,
}

#[derive(Args, Debug)]
pub struct DemoUsersArgs {}

pub async fn login(app: &App, args: DemoLoginArgs) -> Result<()> {
    let user = app
        .session
        .demo_login(&args.identity)
        .await
        .with_context(|| format!("Demo login as '{}' failed", args.identity))?;

    output::success("Logged in with a demo account");
    println!();
    output::profile(&user);

    Ok(())
}

pub fn users(app: &App, _args: DemoUsersArgs) -> Result<()> {
    for identity in app.demo.identities() {
        let base = identity.base.map(|(_, name)| name).unwrap_or("all bases");
        println!(
            "{:<18} {:<20} {:<24} {}",
            identity.username,
            identity.role.as_str(),
            identity.full_name,
            base
        );
    }
    println!();
    output::field("Password", DEMO_PASSWORD);

    Ok(())
}
