use thiserror::Error;

/// Failure to interpret a textual byte size.
///
/// Every parse failure is surfaced to the caller immediately; nothing is
/// retried or logged-and-swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input does not match the size grammar: an unrecognized unit
    /// token, or a malformed numeric part.
    #[error("invalid byte size literal {text:?}")]
    Malformed {
        /// The offending input, as given.
        text: String,
    },

    /// The scaled value does not fit the signed 64-bit byte domain.
    #[error("byte size {text:?} is out of range")]
    Overflow {
        /// The offending input, as given.
        text: String,
    },
}

/// Failure to render a size through a format specifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The numeric sub-format is malformed (for example, two decimal
    /// points).
    #[error("invalid format specifier {spec:?}")]
    InvalidSpec {
        /// The offending specifier, as given.
        spec: String,
    },

    /// The caller-supplied buffer cannot hold the rendered text.
    #[error("output buffer too small for rendered size")]
    BufferTooSmall,
}

/// Failure to build a custom [`UnitTable`](crate::UnitTable).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A prefix or byte-word slot was set to the empty string. An empty
    /// unit token would match every suffix during parsing.
    #[error("unit string for {slot} must not be empty")]
    EmptyUnit {
        /// Which table slot was invalid.
        slot: &'static str,
    },
}
