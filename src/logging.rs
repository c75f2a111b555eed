//! Logger setup shared by the binaries.

use std::io::Write;

/// Initialize env_logger with the daemon-style `[ts level file:line]` format.
///
/// `RUST_LOG` overrides the default `info` filter.
pub fn init() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {} {}:{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}
