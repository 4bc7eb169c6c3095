//! Logger setup for applications driving the renderer.

/// Installs a `fern` logger writing `[time LEVEL target] message` lines to stderr.
///
/// Returns an error if a global logger is already installed.
pub fn setup_logger(level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}
