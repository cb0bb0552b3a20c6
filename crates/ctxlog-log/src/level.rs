//! Level mapping onto `log::Level`

use ctxlog_core::Level;

/// Map a ctxlog level onto the `log` crate's levels
///
/// The named ctxlog levels are inclusive lower bounds of each bucket, so a
/// level between two of them lands in the lower bucket: `INFO+3` is still
/// `Info`, `WARN-1` too. Everything below `INFO` is `Debug`; `Trace` is
/// never produced.
pub fn to_log_level(level: Level) -> log::Level {
    if level >= Level::ERROR {
        log::Level::Error
    } else if level >= Level::WARN {
        log::Level::Warn
    } else if level >= Level::INFO {
        log::Level::Info
    } else {
        log::Level::Debug
    }
}
