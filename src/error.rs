use thiserror::Error;

/// Failure modes of the encoder constructor.
///
/// No partial `Symbol` is ever returned alongside one of these: construction
/// either fully succeeds or fails before any matrix is built.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum QrError {
    #[error("error correction level must be one of L, M, Q, H")]
    InvalidErrorLevel,

    #[error("mode must be one of Numeric, AlphaNum, Byte")]
    UnsupportedMode,

    #[error("forced mode {forced:?} is narrower than the data requires ({needed:?})")]
    ModeIncompatible { forced: crate::Mode, needed: crate::Mode },

    #[error("version must be between 1 and 40, got {0}")]
    InvalidVersion(u8),

    #[error("payload too large: needs {needed} data bits, at most {available} available")]
    PayloadTooLarge { needed: usize, available: usize },
}
