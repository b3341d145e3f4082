//! ASN.1 BER (Basic Encoding Rules) element codec
//!
//! This crate decodes and encodes BER elements as specified in ITU-T X.690.
//! Every element is a TLV triplet:
//!
//! ```text
//! [Tag] [Length] [Value]
//! ```
//!
//! Decoding is built for hostile input: every malformed header or value
//! path fails with a typed [`asn1_core::Asn1Error`] instead of panicking,
//! the parser never reads past an element's declared extent, and nesting is
//! bounded by [`element::MAX_NESTING_DEPTH`].
//!
//! BER deliberately admits several encodings of the same value: definite
//! and indefinite lengths, primitive and constructed string forms, and four
//! REAL representations. The decoder accepts them all; the encoder emits
//! one canonical-ish choice per type (definite lengths unless an element
//! prefers otherwise, primitive strings, binary base-2 REAL).
//!
//! # Usage Example
//!
//! ```
//! use asn1_ber::Element;
//!
//! let (element, consumed) = Element::parse(&[0x02, 0x01, 0x1B]).unwrap();
//! assert_eq!(consumed, 3);
//! assert_eq!(element.integer().unwrap(), 27);
//!
//! let mut reply = Element::with_tag(
//!     asn1_ber::TagClass::Universal,
//!     asn1_ber::Construction::Primitive,
//!     2,
//! );
//! reply.set_integer(-27);
//! assert_eq!(reply.to_bytes().as_ref(), &[0x02, 0x01, 0xE5]);
//! ```

pub mod element;
pub mod length;
pub mod tag;
pub mod value;

pub use element::{Element, MAX_NESTING_DEPTH};
pub use length::{Length, LengthEncoding};
pub use tag::{Construction, TagClass, UniversalTag};

pub use asn1_core::{
    Asn1Error, Asn1Result, BitString, CharacterString, EmbeddedPdv, External, ExternalEncoding,
    Identification, Oid,
};
