//! Length-octet codec
//!
//! BER length octets come in three shapes: short definite (one octet, top
//! bit clear), long definite (0x80 | N followed by N big-endian octets) and
//! indefinite (0x80 alone, terminated by an END-OF-CONTENT element). The
//! octet 0xFF is reserved by X.690 8.1.3.5.

use asn1_core::{Asn1Error, Asn1Result};
use bytes::{BufMut, BytesMut};

/// Decoded length octets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Length {
    /// The content spans exactly this many octets
    Definite(usize),
    /// The content runs until an END-OF-CONTENT element
    Indefinite,
}

/// Encode-time preference for the length form of an element
///
/// Held per element rather than as a process-wide setting, so concurrent
/// encoders cannot observe each other's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthEncoding {
    /// Emit definite-length octets (the default)
    #[default]
    Definite,
    /// Emit 0x80 and close the element with an END-OF-CONTENT marker
    Indefinite,
}

/// Parse the length octets at the start of `input`
///
/// Returns the decoded length and the number of octets consumed.
///
/// # Errors
///
/// - `Truncation` if the input ends inside the length octets.
/// - `LengthUndefined` on the reserved octet 0xFF.
/// - `LengthOverflow` if the long form declares more octets than a machine
///   word can hold.
pub fn parse_length(input: &[u8]) -> Asn1Result<(Length, usize)> {
    let first = *input.first().ok_or(Asn1Error::Truncation {
        context: "length octet",
        needed: 1,
        available: 0,
    })?;

    if first & 0x80 == 0 {
        return Ok((Length::Definite(first as usize), 1));
    }
    if first == 0x80 {
        return Ok((Length::Indefinite, 1));
    }
    if first == 0xFF {
        return Err(Asn1Error::LengthUndefined);
    }

    let octets = (first & 0x7F) as usize;
    if octets > size_of::<usize>() {
        return Err(Asn1Error::LengthOverflow { octets });
    }
    if input.len() < 1 + octets {
        return Err(Asn1Error::Truncation {
            context: "long-form length",
            needed: 1 + octets,
            available: input.len(),
        });
    }
    // BER does not require the long form to be minimal, so leading zero
    // octets are accepted here.
    let mut length: usize = 0;
    for &byte in &input[1..1 + octets] {
        length = (length << 8) | byte as usize;
    }
    Ok((Length::Definite(length), 1 + octets))
}

/// Write length octets
///
/// Definite lengths are emitted on the fewest octets.
pub fn write_length(length: Length, out: &mut BytesMut) {
    match length {
        Length::Definite(len) => {
            if len <= 0x7F {
                out.put_u8(len as u8);
                return;
            }
            let octets = (usize::BITS as usize / 8) - (len.leading_zeros() as usize / 8);
            out.put_u8(0x80 | octets as u8);
            for i in (0..octets).rev() {
                out.put_u8((len >> (i * 8)) as u8);
            }
        }
        Length::Indefinite => out.put_u8(0x80),
    }
}

/// Number of octets `write_length` emits for this length
pub fn length_len(length: Length) -> usize {
    match length {
        Length::Definite(len) if len <= 0x7F => 1,
        Length::Definite(len) => {
            1 + (usize::BITS as usize / 8) - (len.leading_zeros() as usize / 8)
        }
        Length::Indefinite => 1,
    }
}
