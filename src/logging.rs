use tracing_subscriber::{fmt, EnvFilter};

/// tracingの初期化
///
/// `RUST_LOG` があればそれを使い、なければ `info`（`--verbose` 時は `debug`）。
pub fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
