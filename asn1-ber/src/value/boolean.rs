//! BOOLEAN accessor

use asn1_core::{Asn1Error, Asn1Result};

use crate::element::Element;
use crate::tag::Construction;
use crate::value::expect_primitive;

impl Element {
    /// Read the content as a BOOLEAN
    ///
    /// BER accepts any non-zero octet as true.
    ///
    /// # Errors
    ///
    /// `Construction` on a constructed element, `ValueSize` unless the
    /// content is exactly one octet.
    pub fn boolean(&self) -> Asn1Result<bool> {
        expect_primitive(self, "BOOLEAN")?;
        if self.content.len() != 1 {
            return Err(Asn1Error::ValueSize {
                type_name: "BOOLEAN",
                min: 1,
                max: 1,
                actual: self.content.len(),
            });
        }
        Ok(self.content[0] != 0)
    }

    /// Store a BOOLEAN, encoding true as 0xFF
    pub fn set_boolean(&mut self, value: bool) {
        self.construction = Construction::Primitive;
        self.content = vec![if value { 0xFF } else { 0x00 }];
    }
}
