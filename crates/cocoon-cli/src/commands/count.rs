use std::io::{self, Write};
use std::time::Duration;

use anyhow::{bail, Result};
use tracing::info;

use cocoon_core::counter::count_up;
use cocoon_core::format::format_counter;
use cocoon_core::AppConfig;

pub struct CountOptions {
    pub end: u64,
    pub suffix: String,
    pub duration_ms: u64,
    pub fps: u32,
    pub live: bool,
}

/// Time between displayed values; high rates bottom out at 1ms
fn frame_interval(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / fps.max(1) as f64).max(Duration::from_millis(1))
}

/// Print the counter sequence, or play it on one line with `--live`
pub async fn run(config: &AppConfig, options: CountOptions) -> Result<()> {
    if options.fps == 0 {
        bail!("--fps must be greater than 0");
    }

    let separator = &config.counter.thousands_separator;
    let duration = Duration::from_millis(options.duration_ms);
    let interval = frame_interval(options.fps);
    let values = count_up(options.end, duration, interval);

    info!(
        end = options.end,
        duration_ms = options.duration_ms,
        fps = options.fps,
        "counting"
    );

    if !options.live {
        let mut stdout = io::stdout().lock();
        for value in values {
            writeln!(stdout, "{}", format_counter(value, &options.suffix, separator))?;
        }
        return Ok(());
    }

    let mut stdout = io::stdout();
    let mut ticker = tokio::time::interval(interval);
    for value in values {
        ticker.tick().await;
        write!(stdout, "\r{}", format_counter(value, &options.suffix, separator))?;
        stdout.flush()?;
    }
    writeln!(stdout)?;
    Ok(())
}
