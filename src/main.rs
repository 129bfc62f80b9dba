use anyhow::{Context, Result};
use bidmart::app::{App, AppOptions};
use bidmart::cli::Cli;
use bidmart::utils::path::get_log_dir;
use clap::Parser;

/// Set up panic hook to restore terminal state on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Leave raw mode first so the panic message is readable
        let _ = bidmart::tui::restore_terminal();
        original_hook(panic_info);
    }));
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_dir = get_log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {:?}", log_dir))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // stdout belongs to the TUI, so logs go to a file
    let file_appender = tracing_appender::rolling::never(&log_dir, "bidmart.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    if cli.command.is_some() {
        let result = cli.execute();
        drop(guard);
        return result;
    }

    setup_panic_hook();

    let options = AppOptions {
        api_url: cli.api_url,
        theme: cli.theme,
    };
    let result = App::new(options).and_then(|mut app| app.run());

    drop(guard);
    result
}
