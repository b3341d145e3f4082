//! INTEGER and ENUMERATED accessors
//!
//! Both types share the same wire form: big-endian two's complement on the
//! fewest octets that preserve the sign. Decoding rejects redundant leading
//! octets, since X.690 8.3.2 forbids them even under plain BER.

use asn1_core::{Asn1Error, Asn1Result};

use crate::element::Element;
use crate::tag::Construction;
use crate::value::expect_primitive;

/// Decode big-endian two's-complement content
pub(crate) fn decode_integer_content(bytes: &[u8], type_name: &'static str) -> Asn1Result<i64> {
    if bytes.is_empty() || bytes.len() > 8 {
        return Err(Asn1Error::ValueSize {
            type_name,
            min: 1,
            max: 8,
            actual: bytes.len(),
        });
    }
    if bytes.len() >= 2 {
        // A leading 0x00 below a clear sign bit, or 0xFF below a set one,
        // carries no information and is forbidden.
        if bytes[0] == 0x00 && bytes[1] & 0x80 == 0 {
            return Err(Asn1Error::ValuePadding { type_name, octet: 0x00 });
        }
        if bytes[0] == 0xFF && bytes[1] & 0x80 != 0 {
            return Err(Asn1Error::ValuePadding { type_name, octet: 0xFF });
        }
    }
    let fill = if bytes[0] & 0x80 != 0 { 0xFF } else { 0x00 };
    let mut word = [fill; 8];
    word[8 - bytes.len()..].copy_from_slice(bytes);
    Ok(i64::from_be_bytes(word))
}

/// Encode an integer on the fewest octets that preserve the sign
pub(crate) fn encode_integer_content(value: i64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start < 7 {
        let redundant = (bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0)
            || (bytes[start] == 0xFF && bytes[start + 1] & 0x80 != 0);
        if !redundant {
            break;
        }
        start += 1;
    }
    bytes[start..].to_vec()
}

impl Element {
    /// Read the content as an INTEGER
    ///
    /// # Errors
    ///
    /// `Construction` on a constructed element, `ValueSize` outside one to
    /// eight octets, `ValuePadding` on redundant leading octets.
    pub fn integer(&self) -> Asn1Result<i64> {
        expect_primitive(self, "INTEGER")?;
        decode_integer_content(&self.content, "INTEGER")
    }

    /// Store an INTEGER in minimal two's-complement form
    pub fn set_integer(&mut self, value: i64) {
        self.construction = Construction::Primitive;
        self.content = encode_integer_content(value);
    }

    /// Read the content as an ENUMERATED value
    ///
    /// Byte-for-byte identical to INTEGER on the wire.
    pub fn enumerated(&self) -> Asn1Result<i64> {
        expect_primitive(self, "ENUMERATED")?;
        decode_integer_content(&self.content, "ENUMERATED")
    }

    /// Store an ENUMERATED value
    pub fn set_enumerated(&mut self, value: i64) {
        self.set_integer(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_decode_positive() {
        let (element, _) = Element::parse(&hex!("02 01 1B")).unwrap();
        assert_eq!(element.integer().unwrap(), 27);
    }

    #[test]
    fn test_encode_minimal_form() {
        let mut element = Element::new();
        element.tag_number = 2;
        element.set_integer(27);
        assert_eq!(element.to_bytes().as_ref(), hex!("02 01 1B"));
        element.set_integer(0);
        assert_eq!(element.to_bytes().as_ref(), hex!("02 01 00"));
    }

    #[test]
    fn test_negative_values() {
        let mut element = Element::new();
        element.set_integer(-1);
        assert_eq!(element.content(), hex!("FF"));
        element.set_integer(-128);
        assert_eq!(element.content(), hex!("80"));
        element.set_integer(-129);
        assert_eq!(element.content(), hex!("FF 7F"));
        assert_eq!(element.integer().unwrap(), -129);
    }

    #[test]
    fn test_sign_boundary_values() {
        let mut element = Element::new();
        element.set_integer(127);
        assert_eq!(element.content(), hex!("7F"));
        element.set_integer(128);
        assert_eq!(element.content(), hex!("00 80"));
        assert_eq!(element.integer().unwrap(), 128);
        element.set_integer(300);
        assert_eq!(element.content(), hex!("01 2C"));
    }

    #[test]
    fn test_word_extremes_round_trip() {
        let mut element = Element::new();
        for value in [i64::MIN, i64::MAX, -1, 0, 1] {
            element.set_integer(value);
            assert_eq!(element.integer().unwrap(), value);
        }
        element.set_integer(i64::MIN);
        assert_eq!(element.content().len(), 8);
    }

    #[test]
    fn test_padding_rejected() {
        let (element, _) = Element::parse(&hex!("02 02 00 1B")).unwrap();
        assert_eq!(
            element.integer(),
            Err(Asn1Error::ValuePadding { type_name: "INTEGER", octet: 0x00 })
        );
        let (element, _) = Element::parse(&hex!("02 02 FF 80")).unwrap();
        assert_eq!(
            element.integer(),
            Err(Asn1Error::ValuePadding { type_name: "INTEGER", octet: 0xFF })
        );
    }

    #[test]
    fn test_necessary_leading_octets_accepted() {
        // 0x00 before a set sign bit is how positive values >= 128 exist.
        let (element, _) = Element::parse(&hex!("02 02 00 80")).unwrap();
        assert_eq!(element.integer().unwrap(), 128);
        // 0xFF before a clear sign bit is a genuine negative value.
        let (element, _) = Element::parse(&hex!("02 02 FF 7F")).unwrap();
        assert_eq!(element.integer().unwrap(), -129);
    }

    #[test]
    fn test_size_limits() {
        let (element, _) = Element::parse(&hex!("02 00")).unwrap();
        assert!(matches!(element.integer(), Err(Asn1Error::ValueSize { .. })));
        let (element, _) = Element::parse(&hex!("02 09 01 00 00 00 00 00 00 00 00")).unwrap();
        assert_eq!(
            element.integer(),
            Err(Asn1Error::ValueSize { type_name: "INTEGER", min: 1, max: 8, actual: 9 })
        );
    }

    #[test]
    fn test_enumerated_shares_the_wire_form() {
        let (element, _) = Element::parse(&hex!("0A 01 05")).unwrap();
        assert_eq!(element.enumerated().unwrap(), 5);
        let mut element = Element::new();
        element.tag_number = 10;
        element.set_enumerated(-2);
        assert_eq!(element.to_bytes().as_ref(), hex!("0A 01 FE"));
    }

    #[test]
    fn test_constructed_rejected() {
        let (element, _) = Element::parse(&hex!("22 03 02 01 05")).unwrap();
        assert!(matches!(element.integer(), Err(Asn1Error::Construction { .. })));
    }
}
