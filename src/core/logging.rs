use log::LevelFilter;

use crate::types::config::{colors_enabled, config};

fn level_filter(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Install the global logger. Safe to call more than once; later calls are
/// no-ops.
pub fn init_logging() {
    let level = level_filter(config().log().level());
    let color = colors_enabled();

    let dispatch = fern::Dispatch::new()
        .format(move |out, message, record| {
            let level_label = if color {
                let styled = match record.level() {
                    log::Level::Error => console::style(record.level()).red(),
                    log::Level::Warn => console::style(record.level()).yellow(),
                    log::Level::Info => console::style(record.level()).green(),
                    log::Level::Debug => console::style(record.level()).cyan(),
                    log::Level::Trace => console::style(record.level()).dim(),
                };
                styled.to_string()
            } else {
                record.level().to_string()
            };
            out.finish(format_args!(
                "[{} {level_label}] {message}",
                chrono::Local::now().format("%H:%M:%S"),
            ))
        })
        .level(level)
        .chain(std::io::stderr());

    // A second init (e.g. from tests) keeps the first logger.
    let _ = dispatch.apply();
}
