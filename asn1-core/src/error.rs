//! Failure taxonomy for the ASN.1 codecs
//!
//! Every decoding or encoding failure is reported through [`Asn1Error`].
//! The variants are deliberately fine-grained: a caller handling adversarial
//! input needs to distinguish "the buffer ended early" from "the bytes are
//! well-formed but violate the value rules of the requested type", and the
//! tests assert exact failure kinds for every malformed-input path.
//!
//! Failures always surface to the caller immediately. The codecs never
//! swallow an error, retry, or convert one kind into another, and a failing
//! accessor leaves its element untouched.

use thiserror::Error;

/// Failure raised by the ASN.1 codecs
///
/// Each variant carries the context needed to produce a useful diagnostic:
/// the ASN.1 type being decoded, the offending octet, and expected/actual
/// sizes where applicable. `type_name` fields hold the standard ASN.1 type
/// name (for example `"OBJECT IDENTIFIER"`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Asn1Error {
    /// Input ended in the middle of a header or value
    #[error("input truncated while reading {context}: needed {needed} bytes, had {available}")]
    Truncation {
        /// What was being read when the input ran out
        context: &'static str,
        /// Bytes required to finish the read
        needed: usize,
        /// Bytes actually available
        available: usize,
    },

    /// Long-form tag number begins with the padding octet 0x80
    ///
    /// X.690 8.1.2.4.2 requires the tag number to be encoded on the fewest
    /// octets, so a leading base-128 zero digit is invalid.
    #[error("long-form tag number begins with padding octet 0x80")]
    TagPadding,

    /// Tag number does not fit in a machine word
    #[error("tag number spanning {octets} long-form octets exceeds the machine word")]
    TagOverflow {
        /// Long-form octets consumed before giving up
        octets: usize,
    },

    /// Length octet 0xFF, reserved by X.690 8.1.3.5
    #[error("length octet 0xFF is reserved")]
    LengthUndefined,

    /// Length cannot be represented in cursor arithmetic
    #[error("length of {octets} octets exceeds the machine word")]
    LengthOverflow {
        /// Long-form length octets declared, or octets of declared content
        octets: usize,
    },

    /// Generic length violation
    #[error("invalid length for {type_name}: {detail}")]
    Length {
        /// ASN.1 type being decoded
        type_name: &'static str,
        /// Human-readable description of the violation
        detail: &'static str,
    },

    /// Constructed flag violates the requirements of the type
    ///
    /// Raised both for typed accessors (for example a BOOLEAN marked
    /// constructed) and for indefinite length paired with a primitive
    /// element.
    #[error("{type_name} must be {}", construction_mismatch(.constructed))]
    Construction {
        /// ASN.1 type being decoded
        type_name: &'static str,
        /// The construction flag actually found
        constructed: bool,
    },

    /// Content length outside the range permitted for the type
    #[error("{type_name} content must be {min}..={max} bytes, found {actual}")]
    ValueSize {
        /// ASN.1 type being decoded
        type_name: &'static str,
        /// Minimum permitted content length
        min: usize,
        /// Maximum permitted content length
        max: usize,
        /// Length actually found
        actual: usize,
    },

    /// Value carries unnecessary leading or padding octets
    #[error("{type_name} value contains padding octet {octet:#04x}")]
    ValuePadding {
        /// ASN.1 type being decoded
        type_name: &'static str,
        /// The padding octet found
        octet: u8,
    },

    /// Decoded numeric magnitude exceeds the target type
    #[error("{type_name} value exceeds the range of the target type")]
    ValueOverflow {
        /// ASN.1 type being decoded
        type_name: &'static str,
    },

    /// String contains a character outside the permitted set
    #[error("{type_name} contains forbidden byte {octet:#04x} at offset {position}")]
    ValueCharacters {
        /// ASN.1 type being decoded
        type_name: &'static str,
        /// First offending byte
        octet: u8,
        /// Byte offset of the offending character
        position: usize,
    },

    /// Value selects an encoding reserved by the standard
    #[error("{type_name} information octet {octet:#04x} selects a reserved encoding")]
    ValueUndefined {
        /// ASN.1 type being decoded
        type_name: &'static str,
        /// The reserved octet
        octet: u8,
    },

    /// Other semantic violation of the value rules
    #[error("invalid {type_name} value: {detail}")]
    Value {
        /// ASN.1 type being decoded
        type_name: &'static str,
        /// Human-readable description of the violation
        detail: &'static str,
    },

    /// Nested element carries the wrong tag class
    #[error("{type_name} component must be {expected} class, found {found}")]
    TagClass {
        /// ASN.1 type being decoded
        type_name: &'static str,
        /// Expected class name
        expected: &'static str,
        /// Class name actually found
        found: &'static str,
    },

    /// Nested element carries the wrong tag number
    #[error("{type_name} component must have tag number {expected}, found {found}")]
    TagNumber {
        /// ASN.1 type being decoded
        type_name: &'static str,
        /// Expected tag number
        expected: u64,
        /// Tag number actually found
        found: u64,
    },

    /// Nesting exceeded the configured limit
    #[error("nesting exceeds the recursion limit of {limit}")]
    Recursion {
        /// The configured nesting limit
        limit: usize,
    },
}

/// Result type alias for the ASN.1 codecs
pub type Asn1Result<T> = Result<T, Asn1Error>;

fn construction_mismatch(constructed: &bool) -> &'static str {
    if *constructed {
        "primitive, found constructed"
    } else {
        "constructed, found primitive"
    }
}
