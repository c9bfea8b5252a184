use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while encoding a query or decoding a
/// datagram. Offsets are absolute positions in the message buffer.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum Error {
    #[error("truncated header: need {expected} bytes, {available} available")]
    TruncatedHeader { expected: usize, available: usize },

    #[error("truncated question at offset {offset}: need {expected} bytes, {available} available")]
    TruncatedQuestion {
        offset: usize,
        expected: usize,
        available: usize,
    },

    #[error("truncated resource record at offset {offset}: need {expected} bytes, {available} available")]
    TruncatedRecord {
        offset: usize,
        expected: usize,
        available: usize,
    },

    #[error("truncated message: need at least {expected} bytes, {available} available")]
    TruncatedMessage { expected: usize, available: usize },

    #[error("name runs past the end of the buffer at offset {offset}")]
    TruncatedName { offset: usize },

    #[error("invalid compression pointer at offset {offset}{}", .target.map(|t| format!(" to offset {}", t)).unwrap_or_default())]
    InvalidCompressionPointer {
        offset: usize,
        target: Option<usize>,
    },

    #[error("unsupported label type {label:#04x} at offset {offset}")]
    UnsupportedLabelType { offset: usize, label: u8 },

    #[error("encoding failed: {0}")]
    EncodingFailure(#[from] EncodingError),
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum EncodingError {
    #[error("empty label in '{domain}'")]
    EmptyLabel { domain: String },

    #[error("label '{label}' is {length} bytes, the limit is 63")]
    LabelTooLong { label: String, length: usize },

    #[error("name '{domain}' encodes to {length} bytes, the limit is 255")]
    NameTooLong { domain: String, length: usize },

    #[error("{count} questions do not fit in a 16 bit count")]
    TooManyQuestions { count: usize },
}

impl Error {
    /// Re-reports a name that ran off the buffer as a truncated question.
    pub(crate) fn in_question(self, offset: usize, available: usize) -> Self {
        match self {
            Error::TruncatedName { offset: at } => Error::TruncatedQuestion {
                offset,
                expected: at.saturating_sub(offset) + 1,
                available,
            },
            e => e,
        }
    }

    /// Re-reports a name that ran off the buffer as a truncated record.
    pub(crate) fn in_record(self, offset: usize, available: usize) -> Self {
        match self {
            Error::TruncatedName { offset: at } => Error::TruncatedRecord {
                offset,
                expected: at.saturating_sub(offset) + 1,
                available,
            },
            e => e,
        }
    }
}
