//! # Playground CLI
//!
//! Command-line host for the playground editor.

use clap::Parser;
use playground_cli::{run, CliArgs, CliConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = CliConfig::from(&args);
    tracing::debug!(
        "Using slot {} in {}",
        config.editor.storage_key,
        config.data_dir.display()
    );

    let mut stdout = std::io::stdout().lock();
    run(&config, &args.command, &mut stdout)
}

/// Initialize tracing with optional JSON output.
///
/// Set `RUST_LOG` to control log levels (default: info,playground_core=debug).
/// Set `RUST_LOG_FORMAT=json` for JSON output. Logs go to stderr so command
/// output on stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,playground_core=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}
