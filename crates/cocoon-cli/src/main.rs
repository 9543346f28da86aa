use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cocoon_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "cocoon")]
#[command(author, version, about = "The COCOON landing page, with scroll-triggered animations, in your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the landing page (default)
    Run {
        /// Show every section in its final state without waiting for it to scroll into view
        #[arg(long)]
        no_reveal: bool,
    },
    /// Print the values an eased counter shows on its way to a target
    Count {
        /// Target value
        #[arg(short, long)]
        end: u64,
        /// Text appended after the number
        #[arg(short, long, default_value = "")]
        suffix: String,
        /// Animation length (defaults to counter.duration_ms)
        #[arg(short, long)]
        duration_ms: Option<u64>,
        /// Display refresh rate
        #[arg(short, long, default_value_t = 60)]
        fps: u32,
        /// Animate in place instead of printing one value per line
        #[arg(long)]
        live: bool,
    },
    /// Show the config file location
    Config {
        /// Write a config file with default values
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    let tui = matches!(cli.command, None | Some(Commands::Run { .. }));
    init_logging(&config, tui)?;

    let config = Arc::new(config);

    match cli.command {
        Some(Commands::Run { no_reveal }) => commands::run::run(config, no_reveal).await,
        None => commands::run::run(config, false).await,
        Some(Commands::Count {
            end,
            suffix,
            duration_ms,
            fps,
            live,
        }) => {
            let options = commands::count::CountOptions {
                end,
                suffix,
                duration_ms: duration_ms.unwrap_or(config.counter.duration_ms),
                fps,
                live,
            };
            commands::count::run(&config, options).await
        }
        Some(Commands::Config { init }) => commands::config::run(&config, init),
    }
}

/// Log to stderr, or to `<data_dir>/cocoon.log` while the TUI owns the screen
fn init_logging(config: &AppConfig, tui: bool) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if tui {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}
