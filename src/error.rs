/// Initial key derivation errors.
///
/// None of these are transient: each one means the caller passed parameters
/// the derivation cannot honour, or the HKDF backend rejected its input.
/// A failed derivation never yields key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A label (with its prefix) or context is too long for its 1-byte
    /// length prefix in the `HkdfLabel` encoding.
    Encoding { len: usize },
    /// Label text is not ASCII.
    NonAsciiLabel,
    /// A requested output length is zero or larger than can be produced.
    InvalidLength { requested: usize, max: usize },
    /// Connection ID longer than the protocol version permits.
    InvalidConnectionId { len: usize, max: usize },
    /// The HKDF backend hashes with a different function than the suite names.
    HashMismatch,
    /// No HKDF backend for the suite's hash function is compiled in.
    UnsupportedHash,
    /// The extract/expand primitive reported failure.
    Crypto,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Encoding { len } => {
                write!(f, "label field of {len} bytes exceeds 255-byte encoding")
            }
            Error::NonAsciiLabel => write!(f, "label is not ASCII"),
            Error::InvalidLength { requested, max } => {
                write!(f, "invalid output length {requested}, must be 1..={max}")
            }
            Error::InvalidConnectionId { len, max } => {
                write!(f, "connection ID of {len} bytes exceeds maximum of {max}")
            }
            Error::HashMismatch => write!(f, "HKDF hash does not match cipher suite"),
            Error::UnsupportedHash => write!(f, "unsupported hash function"),
            Error::Crypto => write!(f, "cryptographic error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
