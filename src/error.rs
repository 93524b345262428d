use thiserror::Error;

/// Errors surfaced by the crate's fallible operations.
///
/// The geometric core itself recognises no recoverable error conditions;
/// contract violations are debug assertions. Only the debug output paths can
/// fail.
#[derive(Debug, Error)]
pub enum WallOverlapError {
    #[error("failed to write proximity debug svg: {0}")]
    SvgWrite(#[from] std::io::Error),
}
