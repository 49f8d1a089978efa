use thiserror::Error;

/// Errors raised by list and cursor operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An index-addressed operation was given an index outside `0..len`.
    #[error("index {index} is out of range for a list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A cursor was dereferenced (or mutated through) while it points to
    /// no element: either it is an end marker, or its node has been removed.
    #[error("could not dereference an undefined reference")]
    UndefinedReference,

    /// A random source was asked for, or produced, an invalid value.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An element was requested from an empty list.
    #[error("cannot remove an element from an empty list")]
    EmptySequence,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn error_messages() {
        assert_eq!(
            Error::IndexOutOfRange { index: 4, len: 2 }.to_string(),
            "index 4 is out of range for a list of length 2"
        );
        assert_eq!(
            Error::InvalidInput("max < min".to_string()).to_string(),
            "invalid input: max < min"
        );
        assert_eq!(
            Error::EmptySequence.to_string(),
            "cannot remove an element from an empty list"
        );
    }
}
