use core::fmt;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EngineError {
    /// A key or base counter has nonzero bits in a position the engine
    /// reserves for itself.
    OutOfRange,
    /// Every word addressable by the sequence counter has been drawn.
    Exhausted,
    /// A textual engine state did not match the expected grammar.
    Parse,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::OutOfRange => {
                write!(f, "Key or base counter uses reserved bits")
            }
            EngineError::Exhausted => {
                write!(f, "Stream exhausted; restart or reseed to continue")
            }
            EngineError::Parse => {
                write!(f, "Malformed textual engine state")
            }
        }
    }
}

impl std::error::Error for EngineError {}
