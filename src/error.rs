use displaydoc::Display;

/// A specialized result type for driver operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors surfaced to callers of the mutator and configuration surface.
///
/// Parser errors are reported before any pattern state is committed;
/// mutator errors roll back whatever they had committed before returning.
#[derive(Clone, Copy, PartialEq, Debug, Display)]
pub enum Error {
    /// jump brackets in the pattern are unbalanced
    UnbalancedJumps,
    /// color literal is not of the "#RRGGBB" form
    InvalidColorFormat,
    /// pattern contains an unrecognized character ({0})
    UnknownCharacter(char),
    /// pattern contains no tokens
    ZeroLength,
    /// numeric argument is missing or out of range
    InvalidNumber,
    /// no live pattern carries the given id
    InvalidPatternId,
    /// logical led has no physical channel in the id map
    LedNotInMap,
    /// gamut rows must each sum to at most one
    InvalidGamut,
    /// value cannot be interpreted in the expected domain
    TypeMismatch,
    /// out of memory
    AllocationFailure,
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
