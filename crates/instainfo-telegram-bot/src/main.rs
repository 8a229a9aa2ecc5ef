mod redact;

use instainfo_transport_telegram::config::BotSettings;
use instainfo_transport_telegram::runner::run_bot;
use redact::{RedactingMakeWriter, RedactionPatterns};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{prelude::*, EnvFilter};

const QUIET_DIRECTIVES: &str =
    "instainfo_core=info,instainfo_transport_telegram=info,teloxide=warn,hyper=warn,reqwest=warn";

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Nothing may be logged before the token filter is in place
    let patterns = match RedactionPatterns::new() {
        Ok(patterns) => Arc::new(patterns),
        Err(e) => {
            eprintln!("Invalid log redaction rule: {e}");
            return ExitCode::FAILURE;
        }
    };
    install_subscriber(patterns);

    let settings = match BotSettings::load() {
        Ok(settings) => Arc::new(settings),
        Err(e) => {
            error!("Cannot start without valid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Instagram Info Bot starting (lookups via {})",
        settings.lookup.instagram_api_base
    );
    run_bot(settings).await;
    info!("Instagram Info Bot shut down");

    ExitCode::SUCCESS
}

fn install_subscriber(patterns: Arc<RedactionPatterns>) {
    let debug_mode = std::env::var("DEBUG_MODE").ok();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(debug_mode.as_deref())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(RedactingMakeWriter::new(std::io::stderr, patterns)),
        )
        .init();
}

/// Filter used when `RUST_LOG` is unset.
fn default_directives(debug_mode: Option<&str>) -> &'static str {
    match debug_mode {
        Some("true" | "1") => "debug",
        _ => QUIET_DIRECTIVES,
    }
}
