use thiserror::Error;

/// Errors returned by OSC encoding and decoding.
///
/// Note: this error type lives in an internal module; the example is
/// illustrative and not compiled as a public doctest.
///
/// # Examples
/// ```text
/// use oscwire_core::osc::error::OscError;
///
/// let err = OscError::UnknownTypeTag { tag: 'q' };
/// assert!(err.to_string().contains("unknown type tag"));
/// ```
#[derive(Debug, Error)]
pub enum OscError {
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("unterminated string at offset {offset}")]
    UnterminatedString { offset: usize },
    #[error("unknown type tag '{tag}'")]
    UnknownTypeTag { tag: char },
    #[error("datagram does not start with #bundle")]
    NotABundle,
    #[error("nesting depth exceeds {max} levels")]
    DepthExceeded { max: usize },
    #[error("integer {value} does not fit in an OSC int32")]
    IntOutOfRange { value: i64 },
    #[error("blob of {len} bytes exceeds the u32 length field")]
    BlobTooLarge { len: usize },
    #[error("bundle element of {len} bytes exceeds the i32 length prefix")]
    ElementTooLarge { len: usize },
}
