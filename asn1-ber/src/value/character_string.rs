//! Unrestricted CHARACTER STRING accessor
//!
//! Shares the two-child AUTOMATIC TAGS shape with EmbeddedPDV; only the
//! payload semantics differ, so the composite codec lives in
//! [`crate::value::embedded_pdv`] and is reused here.

use asn1_core::{Asn1Result, CharacterString};

use crate::element::Element;
use crate::tag::Construction;
use crate::value::embedded_pdv::{decode_pdv_components, encode_pdv_components};

impl Element {
    /// Read the content as an unrestricted CHARACTER STRING
    ///
    /// # Errors
    ///
    /// As [`Element::embedded_pdv`]: any departure from the two-child
    /// composite shape.
    pub fn character_string(&self) -> Asn1Result<CharacterString> {
        let (identification, string_value) = decode_pdv_components(self, "CharacterString")?;
        Ok(CharacterString { identification, string_value })
    }

    /// Store an unrestricted CHARACTER STRING
    pub fn set_character_string(&mut self, value: &CharacterString) {
        self.construction = Construction::Constructed;
        self.content = encode_pdv_components(&value.identification, &value.string_value);
    }
}
