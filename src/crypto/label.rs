//! TLS 1.3 `HkdfLabel` encoding (RFC 8446 section 7.1), as used by QUIC.
//!
//! ```text
//! struct {
//!     uint16 length = Length;
//!     opaque label<7..255> = prefix + Label;
//!     opaque context<0..255> = Context;
//! } HkdfLabel;
//! ```

use crate::crypto::Hkdf;
use crate::error::Error;

/// Largest possible encoding: 2 + (1 + 255) + (1 + 255).
pub const MAX_INFO_LEN: usize = 514;

/// An encoded `HkdfLabel`, ready to pass as HKDF-Expand `info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HkdfLabel {
    info: heapless::Vec<u8, MAX_INFO_LEN>,
}

impl HkdfLabel {
    /// Encode an `HkdfLabel`.
    ///
    /// Fails rather than truncating when `prefix + label` or `context` is
    /// longer than 255 bytes, or `out_len` does not fit in 16 bits. The
    /// label text must be ASCII.
    pub fn new(
        prefix: &[u8],
        label: &[u8],
        context: &[u8],
        out_len: usize,
    ) -> Result<Self, Error> {
        let out_len = u16::try_from(out_len).map_err(|_| Error::InvalidLength {
            requested: out_len,
            max: u16::MAX as usize,
        })?;
        if !prefix.is_ascii() || !label.is_ascii() {
            return Err(Error::NonAsciiLabel);
        }
        let full_label_len = prefix.len() + label.len();
        let full_label_len_u8 =
            u8::try_from(full_label_len).map_err(|_| Error::Encoding { len: full_label_len })?;
        let context_len =
            u8::try_from(context.len()).map_err(|_| Error::Encoding { len: context.len() })?;

        let mut info = heapless::Vec::new();
        // Capacity covers the largest encodable label, so these cannot fail.
        info.extend_from_slice(&out_len.to_be_bytes())
            .map_err(|_| Error::Encoding { len: full_label_len })?;
        info.push(full_label_len_u8)
            .map_err(|_| Error::Encoding { len: full_label_len })?;
        info.extend_from_slice(prefix)
            .map_err(|_| Error::Encoding { len: full_label_len })?;
        info.extend_from_slice(label)
            .map_err(|_| Error::Encoding { len: full_label_len })?;
        info.push(context_len)
            .map_err(|_| Error::Encoding { len: context.len() })?;
        info.extend_from_slice(context)
            .map_err(|_| Error::Encoding { len: context.len() })?;

        Ok(Self { info })
    }

    /// The encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.info
    }
}

/// HKDF-Expand-Label: `HKDF-Expand(secret, HkdfLabel, out.len())`.
pub fn hkdf_expand_label<H: Hkdf>(
    hkdf: &H,
    secret: &[u8],
    prefix: &[u8],
    label: &[u8],
    context: &[u8],
    out: &mut [u8],
) -> Result<(), Error> {
    let info = HkdfLabel::new(prefix, label, context, out.len())?;
    hkdf.expand(secret, info.as_bytes(), out)
}
