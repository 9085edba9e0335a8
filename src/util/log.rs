use anyhow::Result;
use tracing_subscriber::fmt::time::OffsetTime;

/// Initialises logging for binaries embedding this crate: writes to
/// `run.log` with a UTC timestamp and source locations. Call once at
/// startup; a second call fails because the global subscriber is already
/// set.
pub fn setup_log() -> Result<()> {
    let logfile = std::fs::OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open("run.log")?;
    let timer = OffsetTime::new(
        time::UtcOffset::UTC,
        time::macros::format_description!("[hour]:[minute]:[second].[subsecond digits:6]"),
    );
    tracing_subscriber::fmt()
        .event_format(
            tracing_subscriber::fmt::format()
                .with_target(false)
                .with_source_location(true)
                .with_timer(timer),
        )
        .with_writer(logfile)
        .init();
    Ok(())
}
