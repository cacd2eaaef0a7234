// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count; `None` defers to `RUST_LOG`.
pub fn verbosity_directive(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Installs the stderr subscriber. A second call is a no-op.
pub fn init_logging(verbose: u8) {
    let filter = match verbosity_directive(verbose) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::{init_logging, verbosity_directive};

    #[test]
    fn verbosity_maps_to_increasing_levels() {
        assert_eq!(verbosity_directive(0), None);
        assert_eq!(verbosity_directive(1), Some("info"));
        assert_eq!(verbosity_directive(2), Some("debug"));
        assert_eq!(verbosity_directive(7), Some("trace"));
    }

    #[test]
    fn repeated_init_does_not_panic() {
        init_logging(1);
        init_logging(2);
    }
}
