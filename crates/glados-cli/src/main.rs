//! CLI entry point.
//!
//! Owns the tokio runtime. The terminal loop runs on this thread, outside
//! the runtime; background work is spawned onto it through its handle.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use glados_cli::{Cli, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = bootstrap::resolve_settings(cli)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("glados-worker")
        .build()
        .map_err(CliError::from)?;

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => handlers::chat(&settings, cli.tts_api_key.clone(), runtime.handle())?,
        Commands::Models => handlers::models(&settings, runtime.handle())?,
    }
    Ok(())
}

fn main() {
    // Before parsing, so `.env` values reach clap's `env` fallbacks.
    let env_files = bootstrap::load_env_files();

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    for path in &env_files {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        std::process::exit(code);
    }
}
