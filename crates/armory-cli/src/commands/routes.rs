//! Route listing and guard evaluation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use armory_core::guard::{Access, GuardAction};

use crate::output;
use crate::session::App;

#[derive(Args, Debug)]
pub struct RoutesArgs {}

#[derive(Args, Debug)]
pub struct NavigateArgs {
    /// Client path, e.g. /assignments
    pub path: String,
}

pub fn list(app: &App, _args: RoutesArgs) -> Result<()> {
    for route in app.guard.table().routes() {
        let who = match &route.access {
            Access::Public => "public".to_string(),
            Access::Protected(requirement) if requirement.is_any() => "signed in".to_string(),
            Access::Protected(requirement) => requirement
                .roles()
                .map(|role| role.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        };

        let verdict = describe(&app.guard.resolve(route.path).action);
        println!("{:<14} {:<14} {:<32} {}", route.path, route.title, who, verdict);
    }

    Ok(())
}

pub fn navigate(app: &App, args: NavigateArgs) -> Result<()> {
    let navigation = app.guard.resolve(&args.path);

    output::field("Path", &navigation.path);
    if let Some(decision) = navigation.decision {
        output::field("Decision", &format!("{decision:?}"));
    }
    output::field("Action", &describe(&navigation.action).to_string());

    Ok(())
}

fn describe(action: &GuardAction) -> colored::ColoredString {
    match action {
        GuardAction::ShowLoading => "loading".dimmed(),
        GuardAction::Redirect { to, replace: true } => format!("redirect to {to} (replace)").yellow(),
        GuardAction::Redirect { to, replace: false } => format!("redirect to {to}").yellow(),
        GuardAction::ShowAccessDenied => "access denied".red(),
        GuardAction::Render => "render".green(),
    }
}
