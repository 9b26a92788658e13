use std::{path::Path, sync::LazyLock};

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::fmt::{format::FmtSpan, writer::MakeWriterExt};

pub const CLI_PREFIX: &str = "cli";
const KEPT_LOG_FILES: usize = 5;

/// Logs always go to `<data dir>/logs`. With `verbose` they are also echoed to stderr at trace
/// level, otherwise the level comes from `RUST_LOG` (default debug). Stdout stays reserved for
/// command output.
pub fn enable_logging(data_dir: &Path, verbose: bool) -> Result<()> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(KEPT_LOG_FILES)
        .filename_prefix(CLI_PREFIX)
        .build(data_dir.join("logs"))?;

    let console = std::io::stderr.with_filter(move |_| verbose);

    let level = if verbose {
        LevelFilter::TRACE.to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(format!(
            "{}={level}",
            env!("CARGO_PKG_NAME").replace("-", "_"),
        )))
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(console.and(appender))
        .pretty()
        .init();
    Ok(())
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .try_init();
});
