//! NULL and END-OF-CONTENT accessors
//!
//! Both carry no content; END-OF-CONTENT additionally serves as the
//! terminator of indefinite-length elements and is what a default-constructed
//! [`Element`] represents.

use asn1_core::{Asn1Error, Asn1Result};

use crate::element::Element;
use crate::tag::Construction;
use crate::value::expect_primitive;

fn expect_empty(element: &Element, type_name: &'static str) -> Asn1Result<()> {
    expect_primitive(element, type_name)?;
    if !element.content().is_empty() {
        return Err(Asn1Error::ValueSize {
            type_name,
            min: 0,
            max: 0,
            actual: element.content().len(),
        });
    }
    Ok(())
}

impl Element {
    /// Check the content as a NULL value
    pub fn null(&self) -> Asn1Result<()> {
        expect_empty(self, "NULL")
    }

    /// Store a NULL value
    pub fn set_null(&mut self) {
        self.construction = Construction::Primitive;
        self.content = Vec::new();
    }

    /// Check the content as an END-OF-CONTENT marker
    pub fn end_of_content(&self) -> Asn1Result<()> {
        expect_empty(self, "END OF CONTENT")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_null_round_trip() {
        let (element, used) = Element::parse(&hex!("05 00")).unwrap();
        assert_eq!(used, 2);
        element.null().unwrap();
        let mut fresh = Element::new();
        fresh.tag_number = 5;
        fresh.set_null();
        assert_eq!(fresh.to_bytes().as_ref(), hex!("05 00"));
    }

    #[test]
    fn test_nonempty_content_rejected() {
        let (element, _) = Element::parse(&hex!("05 01 00")).unwrap();
        assert_eq!(
            element.null(),
            Err(Asn1Error::ValueSize { type_name: "NULL", min: 0, max: 0, actual: 1 })
        );
    }

    #[test]
    fn test_constructed_rejected() {
        let mut element = Element::new();
        element.construction = Construction::Constructed;
        assert!(matches!(element.null(), Err(Asn1Error::Construction { .. })));
        assert!(matches!(element.end_of_content(), Err(Asn1Error::Construction { .. })));
    }

    #[test]
    fn test_default_element_is_end_of_content() {
        Element::new().end_of_content().unwrap();
    }
}
