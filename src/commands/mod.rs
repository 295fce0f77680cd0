//! Command dispatch and handlers.

pub mod check;
pub mod serve;

use crate::cli::Command;
use crate::config::Settings;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// When `SNYK_REACH_RECORD` is set to a file path, all upstream traffic is
/// recorded to that cassette. `check --replay` takes precedence over it.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command, settings: Settings) -> Result<(), String> {
    let replay = match command {
        Command::Check { replay, .. } => replay.as_deref(),
        Command::Serve { .. } => None,
    };
    let ctx = ServiceContext::from_settings(&settings, replay).map_err(|e| e.to_string())?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to create tokio runtime: {e}"))?;

    let result = runtime.block_on(async {
        match command {
            Command::Check { url, severity, body, .. } => {
                let body = check::request_body(url.as_deref(), severity.as_deref(), body.as_deref());
                check::run(&ctx.service(settings), &body).await
            }
            Command::Serve { addr } => serve::run(*addr, ctx.service(settings)).await,
        }
    });

    // Writes the cassette when recording, even if the command failed.
    drop(ctx);
    result
}
