//! Packstream errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    #[error("Unknown marker byte: {0:#04x}")]
    UnknownMarker(u8),

    #[error("Unexpected end of data")]
    UnexpectedEnd,

    #[error("String data is not valid UTF-8")]
    InvalidUtf8,

    #[error("Values nested deeper than {0} levels")]
    TooDeep(usize),

    #[error("Map keys must be strings")]
    NonStringKey,

    #[error("{kind} too large to pack: {size}")]
    TooLarge { kind: &'static str, size: usize },

    #[error("Unknown structure signature: {0:#04x}")]
    UnknownStructure(u8),

    #[error("Malformed structure: {0}")]
    MalformedStructure(String),

    #[error("Cannot send an unbound {0} as a parameter")]
    UnboundEntity(&'static str),

    #[error("A {0} cannot be sent as a parameter")]
    UnsupportedParameter(&'static str),
}
