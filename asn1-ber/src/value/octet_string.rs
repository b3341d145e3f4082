//! OCTET STRING accessor

use asn1_core::Asn1Result;

use crate::element::Element;
use crate::tag::Construction;
use crate::value::reassembled_content;

impl Element {
    /// Read the content as an OCTET STRING
    ///
    /// Primitive form returns the content verbatim. Constructed form
    /// concatenates the child segments, which must repeat the outer tag
    /// class and number.
    ///
    /// # Errors
    ///
    /// `TagClass`/`TagNumber` on mismatched segments, `Recursion` when
    /// segment nesting exceeds the limit.
    pub fn octet_string(&self) -> Asn1Result<Vec<u8>> {
        reassembled_content(self, "OCTET STRING")
    }

    /// Store an OCTET STRING
    pub fn set_octet_string(&mut self, value: &[u8]) {
        self.construction = Construction::Primitive;
        self.content = value.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asn1_core::Asn1Error;
    use crate::element::MAX_NESTING_DEPTH;
    use hex_literal::hex;

    #[test]
    fn test_primitive_round_trip() {
        let (element, _) = Element::parse(&hex!("04 04 DE AD BE EF")).unwrap();
        assert_eq!(element.octet_string().unwrap(), hex!("DE AD BE EF"));
        let mut fresh = Element::new();
        fresh.tag_number = 4;
        fresh.set_octet_string(&hex!("DE AD BE EF"));
        assert_eq!(fresh.to_bytes().as_ref(), hex!("04 04 DE AD BE EF"));
    }

    #[test]
    fn test_empty() {
        let (element, _) = Element::parse(&hex!("04 00")).unwrap();
        assert!(element.octet_string().unwrap().is_empty());
    }

    #[test]
    fn test_constructed_concatenation() {
        let (element, _) = Element::parse(&hex!("24 08 04 02 AA BB 04 02 CC DD")).unwrap();
        assert_eq!(element.octet_string().unwrap(), hex!("AA BB CC DD"));
    }

    #[test]
    fn test_nested_constructed_segments() {
        // A constructed segment inside a constructed string flattens.
        let (element, _) =
            Element::parse(&hex!("24 0A 04 02 AA BB 24 04 04 02 CC DD")).unwrap();
        assert_eq!(element.octet_string().unwrap(), hex!("AA BB CC DD"));
    }

    #[test]
    fn test_segment_tag_mismatch_rejected() {
        // Child is a UTF8String, not an OCTET STRING.
        let (element, _) = Element::parse(&hex!("24 04 0C 02 AA BB")).unwrap();
        assert_eq!(
            element.octet_string(),
            Err(Asn1Error::TagNumber { type_name: "OCTET STRING", expected: 4, found: 12 })
        );
    }

    #[test]
    fn test_segment_class_mismatch_rejected() {
        let (element, _) = Element::parse(&hex!("24 04 84 02 AA BB")).unwrap();
        assert!(matches!(element.octet_string(), Err(Asn1Error::TagClass { .. })));
    }

    #[test]
    fn test_reassembly_depth_bounded() {
        // 04 segments wrapped in constructed 24 layers beyond the limit.
        let mut bytes = hex!("04 01 AA").to_vec();
        for _ in 0..MAX_NESTING_DEPTH + 1 {
            let mut outer = vec![0x24, bytes.len() as u8];
            outer.extend_from_slice(&bytes);
            bytes = outer;
        }
        let (element, _) = Element::parse(&bytes).unwrap();
        assert_eq!(
            element.octet_string(),
            Err(Asn1Error::Recursion { limit: MAX_NESTING_DEPTH })
        );
    }
}
