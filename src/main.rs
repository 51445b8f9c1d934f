mod bands;
mod calc;
mod config;
mod drafts;
mod filter;
mod ipc;
mod logging;
mod models;
mod seed;
mod store;

use clap::Parser;
use std::io::{self, BufRead, Write};

fn main() -> anyhow::Result<()> {
    let args = config::CliArgs::parse();
    logging::init_logging(&args)?;

    let mut state = ipc::AppState::new(args.seed);
    if state.portal.users.is_empty() && state.portal.classes.is_empty() {
        tracing::info!("starting with empty collections");
    }
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        seed = args.seed.as_str(),
        "campusd ready"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, "stdin read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let resp = match serde_json::from_str::<ipc::Request>(&line) {
            Ok(req) => ipc::handle_request(&mut state, req),
            Err(e) => {
                // No id to echo back.
                tracing::warn!(error = %e, "unparseable request");
                ipc::err("", "bad_json", e.to_string(), None)
            }
        };

        let out = serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string());
        writeln!(stdout, "{}", out)?;
        stdout.flush()?;
    }

    tracing::info!("stdin closed, exiting");
    Ok(())
}
