//! terse binary entry point: CLI parsing, logging setup, exit-code mapping.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use terse::config::Config;
use terse::terminal::Terminal;
use terse::Editor;

#[derive(Debug, Parser)]
#[command(name = "terse", version, about = "A tiny, fast terminal text editor")]
struct Args {
    /// File to edit; omit to start with an empty document
    file: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_logging();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // The Terminal drop guard has already restored the screen.
            eprintln!("terse: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let (config, config_warning) = Config::load();

    let mut editor = match &args.file {
        Some(path) => Editor::open(path, config)
            .with_context(|| format!("failed to open {}", path.display()))?,
        None => Editor::new(config),
    };
    editor.set_status_message("HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find");
    if let Some(warning) = config_warning {
        editor.set_status_message(warning);
    }

    let mut terminal = Terminal::new().context("failed to configure the terminal")?;
    editor.run(&mut terminal)?;
    Ok(())
}

/// Log to the file named by `TERSE_LOG`, filtered by `RUST_LOG`. Stdout and
/// stderr carry the frame stream, so there is nowhere else to log.
fn init_logging() {
    let Ok(path) = std::env::var("TERSE_LOG") else {
        return;
    };
    let Ok(file) = std::fs::File::create(&path) else {
        eprintln!("terse: cannot open log file {path}");
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
}
