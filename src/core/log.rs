use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Maps the number of `-v` flags to the level of the `lofarb` target.
///
/// Skipped upstream tables are reported at `warn`, so that stays visible
/// with no flags at all.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs the global subscriber. `RUST_LOG` takes precedence for
/// dependencies; `lofarb` itself always follows `verbosity`.
pub fn init_logging(verbosity: u8) {
    let level = level_for(verbosity);
    let app_filter = Targets::new()
        .with_target("lofarb", level)
        // reqwest and hyper are chatty, only surface them from -vvv
        .with_default(if verbosity >= 3 {
            LevelFilter::TRACE
        } else {
            LevelFilter::WARN
        });
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let fmt_layer = fmt::layer().without_time().with_target(verbosity >= 2);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(app_filter)
        .with(env_filter)
        .init();
}
