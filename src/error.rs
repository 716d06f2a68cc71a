use thiserror::Error;

/// The tool's single error type. Every failure kind in the taxonomy collapses to the same
/// outcome at the process boundary — print this message to stderr, exit 1 — so `main` never
/// branches on the variant, only on whether `run` returned `Err` at all. Kept as a tagged enum
/// rather than a bare `String` so a future caller (or a stricter CLI) can still distinguish
/// them without re-parsing messages.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Argument(String),
    #[error("{0}")]
    Config(String),
    #[error("{0}")]
    Source(String),
    #[error("{0}")]
    Resolution(String),
}
