//! BIT STRING accessor
//!
//! The first content octet counts the unused trailing bits of the final
//! payload octet. In constructed form the value is split across segments,
//! and only the final segment may stop short of a byte boundary.

use asn1_core::{Asn1Error, Asn1Result, BitString};

use crate::element::{Element, MAX_NESTING_DEPTH};
use crate::tag::Construction;
use crate::value::{children_of, segment_tag_check};

/// Decode primitive BIT STRING content octets
pub(crate) fn decode_bit_string_content(content: &[u8]) -> Asn1Result<BitString> {
    let unused = *content.first().ok_or(Asn1Error::Length {
        type_name: "BIT STRING",
        detail: "content cannot be empty",
    })?;
    if unused > 7 {
        return Err(Asn1Error::Value {
            type_name: "BIT STRING",
            detail: "unused-bit count exceeds 7",
        });
    }
    if unused > 0 && content.len() == 1 {
        return Err(Asn1Error::Value {
            type_name: "BIT STRING",
            detail: "unused bits declared without payload octets",
        });
    }
    let payload = content[1..].to_vec();
    let num_bits = payload.len() * 8 - unused as usize;
    BitString::new(payload, num_bits)
}

fn collect_bit_segments(
    element: &Element,
    depth: usize,
    out: &mut Vec<BitString>,
) -> Asn1Result<()> {
    if depth == 0 {
        return Err(Asn1Error::Recursion { limit: MAX_NESTING_DEPTH });
    }
    for child in children_of(element.content(), depth - 1)? {
        segment_tag_check(element, &child, "BIT STRING")?;
        match child.construction {
            Construction::Primitive => out.push(decode_bit_string_content(child.content())?),
            Construction::Constructed => collect_bit_segments(&child, depth - 1, out)?,
        }
    }
    Ok(())
}

impl Element {
    /// Read the content as a BIT STRING
    ///
    /// # Errors
    ///
    /// `Length` on empty content, `Value` on an unused-bit count above 7 or
    /// one declared without payload, and in constructed form `Value` when
    /// any segment except the last ends off a byte boundary.
    pub fn bit_string(&self) -> Asn1Result<BitString> {
        match self.construction {
            Construction::Primitive => decode_bit_string_content(self.content()),
            Construction::Constructed => {
                let mut segments = Vec::new();
                collect_bit_segments(self, MAX_NESTING_DEPTH, &mut segments)?;
                for segment in segments.iter().rev().skip(1) {
                    if segment.unused_bits() != 0 {
                        return Err(Asn1Error::Value {
                            type_name: "BIT STRING",
                            detail: "only the final segment may have unused bits",
                        });
                    }
                }
                let mut bits = BitString::empty();
                for segment in &segments {
                    bits.concat(segment);
                }
                Ok(bits)
            }
        }
    }

    /// Store a BIT STRING
    pub fn set_bit_string(&mut self, value: &BitString) {
        self.construction = Construction::Primitive;
        let mut content = Vec::with_capacity(1 + value.as_bytes().len());
        content.push(value.unused_bits());
        content.extend_from_slice(value.as_bytes());
        self.content = content;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_primitive_round_trip() {
        let (element, _) = Element::parse(&hex!("03 02 07 80")).unwrap();
        let bits = element.bit_string().unwrap();
        assert_eq!(bits.num_bits(), 1);
        assert!(bits.bit(0).unwrap());

        let mut fresh = Element::new();
        fresh.tag_number = 3;
        fresh.set_bit_string(&bits);
        assert_eq!(fresh.to_bytes().as_ref(), hex!("03 02 07 80"));
    }

    #[test]
    fn test_empty_bit_string() {
        let (element, _) = Element::parse(&hex!("03 01 00")).unwrap();
        let bits = element.bit_string().unwrap();
        assert_eq!(bits.num_bits(), 0);

        let mut fresh = Element::new();
        fresh.set_bit_string(&BitString::empty());
        assert_eq!(fresh.content(), hex!("00"));
    }

    #[test]
    fn test_empty_content_rejected() {
        let (element, _) = Element::parse(&hex!("03 00")).unwrap();
        assert_eq!(
            element.bit_string(),
            Err(Asn1Error::Length { type_name: "BIT STRING", detail: "content cannot be empty" })
        );
    }

    #[test]
    fn test_unused_count_out_of_range_rejected() {
        let (element, _) = Element::parse(&hex!("03 02 08 80")).unwrap();
        assert!(matches!(element.bit_string(), Err(Asn1Error::Value { .. })));
    }

    #[test]
    fn test_unused_bits_without_payload_rejected() {
        // Deceptive: a valid count but nothing for it to refer to.
        let (element, _) = Element::parse(&hex!("03 01 01")).unwrap();
        assert!(matches!(element.bit_string(), Err(Asn1Error::Value { .. })));
    }

    #[test]
    fn test_constructed_reassembly() {
        // Two aligned segments, then a final segment of three bits.
        let (element, _) =
            Element::parse(&hex!("23 0C 03 02 00 AA 03 02 00 BB 03 02 05 A0")).unwrap();
        let bits = element.bit_string().unwrap();
        assert_eq!(bits.num_bits(), 19);
        assert_eq!(bits.as_bytes(), hex!("AA BB A0"));
        assert_eq!(bits.unused_bits(), 5);
    }

    #[test]
    fn test_unaligned_intermediate_segment_rejected() {
        let (element, _) = Element::parse(&hex!("23 08 03 02 05 A0 03 02 00 BB")).unwrap();
        assert_eq!(
            element.bit_string(),
            Err(Asn1Error::Value {
                type_name: "BIT STRING",
                detail: "only the final segment may have unused bits",
            })
        );
    }

    #[test]
    fn test_segment_tag_mismatch_rejected() {
        let (element, _) = Element::parse(&hex!("23 04 04 02 00 AA")).unwrap();
        assert!(matches!(element.bit_string(), Err(Asn1Error::TagNumber { .. })));
    }
}
