//! Logging initialisation via tracing-subscriber.
//!
//! Call [`init`] once at startup, after the config is resolved. Logs go to
//! stderr so they never interleave with the console's menu on stdout.

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Initialise the global tracing subscriber.
///
/// `level` is any `EnvFilter` directive (`"warn"`, `"library_circulation=debug"`).
/// `RUST_LOG` is used instead when `level` does not parse.
///
/// # Errors
///
/// Returns `AppError::Logger` if neither `level` nor `RUST_LOG` is a valid
/// filter, or if a global subscriber is already installed.
pub fn init(level: &str) -> Result<(), AppError> {
    let filter = match EnvFilter::try_new(level) {
        Ok(filter) => filter,
        Err(level_err) => EnvFilter::try_from_default_env().map_err(|env_err| {
            AppError::Logger(format!(
                "invalid log level '{level}': {level_err}; RUST_LOG parse failed: {env_err}"
            ))
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use super::init;
    use crate::error::AppError;

    #[test]
    #[allow(clippy::panic)]
    fn init_succeeds_or_is_already_set() {
        // Another test may have installed the subscriber first.
        match init("warn") {
            Ok(()) => {}
            Err(AppError::Logger(msg)) => assert!(msg.contains("set subscriber"), "{msg}"),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}
