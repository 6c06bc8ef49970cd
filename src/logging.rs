use tracing_subscriber::EnvFilter;

/// All workspace crate targets that should receive log output.
const CRATE_TARGETS: &[&str] = &[
    "sindex",
    "sindex_calendar",
    "sindex_diagnostics",
    "sindex_distr",
    "sindex_index",
    "sindex_reference",
    "sindex_series",
    "sindex_window",
];

/// Maps the `-v` count to a level name.
fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Default filter directive covering every workspace crate.
fn default_directive(verbosity: u8) -> String {
    let level = level_for(verbosity);
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize tracing based on CLI verbosity level.
///
/// Logs go to stderr so index CSV can be streamed to stdout. `RUST_LOG`
/// overrides the CLI flag if set.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(7), "trace");
    }

    #[test]
    fn directive_covers_all_crates() {
        let d = default_directive(1);
        assert!(d.starts_with("sindex=info,"));
        assert_eq!(d.matches("=info").count(), CRATE_TARGETS.len());
    }
}
