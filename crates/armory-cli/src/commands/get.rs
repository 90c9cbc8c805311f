//! Authenticated GET through the gateway.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use armory_core::ErrorKind;
use armory_http::REDIRECT_DELAY;

use crate::output;
use crate::session::App;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// API path below the base URL, e.g. purchases or dashboard/metrics
    pub path: String,

    /// Query parameter as key=value (repeatable)
    #[arg(long = "query", short = 'q', value_parser = parse_pair)]
    pub query: Vec<(String, String)>,
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}

pub async fn run(app: &App, args: GetArgs) -> Result<()> {
    let result: armory_core::Result<Value> = app.gateway.get(&args.path, &args.query).await;

    match result {
        Ok(body) => output::json_pretty(&body),
        Err(e) if e.kind() == ErrorKind::SessionExpired => {
            // Let the scheduled redirect report before the process exits.
            tokio::time::sleep(REDIRECT_DELAY * 2).await;
            Err(e).context("Session expired")
        }
        Err(e) => Err(e).with_context(|| format!("GET {} failed", args.path)),
    }
}
