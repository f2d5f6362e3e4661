use std::io;
use std::path::PathBuf;

use clap::Parser;
use tomodachi::{interactive, load_config, Keeper, SystemClock};

/// Look after a virtual pet from your terminal
#[derive(Debug, Parser)]
#[command(name = "tomodachi", version, about)]
struct Args {
    /// Open the full-screen window instead of the command loop
    #[arg(long)]
    tui: bool,

    /// Restore a saved pet at startup
    #[arg(long, value_name = "PATH")]
    load: Option<PathBuf>,

    /// Name for a newly adopted pet
    #[arg(long)]
    name: Option<String>,

    /// Config file (defaults to config.toml in the platform config dir)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log at info level
    #[arg(short, long)]
    verbose: bool,

    /// Log at debug level
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else if args.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    // stdout belongs to the pet; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting tomodachi version {}", env!("CARGO_PKG_VERSION"));

    let config = load_config(args.config.as_deref())?;
    let name = args.name.unwrap_or(config.pet_name);
    let mut keeper = Keeper::new(name, SystemClock, config.rules, config.save_path);

    if let Some(path) = args.load.as_deref() {
        if let Err(e) = keeper.load(Some(path)) {
            // keep going with the newborn pet
            tracing::error!("Could not restore pet from {}: {}", path.display(), e);
        }
    }

    if args.tui {
        interactive::tui::run(&mut keeper).map_err(|e| anyhow::anyhow!("{e:?}"))?;
    } else {
        let stdin = io::stdin();
        interactive::run(&mut keeper, stdin.lock(), io::stdout().lock())?;
    }

    tracing::info!("Shutting down normally");
    Ok(())
}
