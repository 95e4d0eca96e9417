//! Debug diagnostics
//!
//! Set `DYNVAL_DEBUG` to any value to have debug builds report, on stderr,
//! the cases where an operation silently resolved to its conservative
//! default (absorbed coercion failures, unknown operator tokens).

/// Check if debug logging is enabled via `DYNVAL_DEBUG` env var.
/// Only available in debug builds to avoid performance impact in release.
#[cfg(debug_assertions)]
pub(crate) fn debug_enabled() -> bool {
    use std::sync::OnceLock;
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| std::env::var("DYNVAL_DEBUG").is_ok())
}

/// Emit debug logs in debug builds without relying on `eprintln!`.
#[cfg(debug_assertions)]
pub(crate) fn debug_log(args: std::fmt::Arguments<'_>) {
    if debug_enabled() {
        use std::io::Write;
        let _ = writeln!(std::io::stderr(), "{args}");
    }
}
