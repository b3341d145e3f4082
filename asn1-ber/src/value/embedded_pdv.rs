//! EmbeddedPDV accessor, and the AUTOMATIC TAGS composite shape it shares
//! with the unrestricted CHARACTER STRING
//!
//! Both types encode as a constructed element of exactly two
//! context-specific children: [0] wraps the identification CHOICE, [2]
//! carries the payload octets. The CHOICE itself is one nested
//! context-specific element whose tag number 0-5 selects the variant;
//! variants 0 (syntaxes) and 3 (context-negotiation) are in turn sequences
//! of exactly two context-specific primitives tagged [0] and [1].

use asn1_core::{Asn1Error, Asn1Result, EmbeddedPdv, Identification, Oid};

use crate::element::{Element, MAX_NESTING_DEPTH};
use crate::tag::{Construction, TagClass};
use crate::value::integer::{decode_integer_content, encode_integer_content};
use crate::value::object_identifier::{decode_oid_content, encode_oid_content};
use crate::value::{children_of, concat_children, element_with, expect_constructed};

fn expect_context(element: &Element, type_name: &'static str) -> Asn1Result<()> {
    if element.tag_class != TagClass::ContextSpecific {
        return Err(Asn1Error::TagClass {
            type_name,
            expected: "context-specific",
            found: element.tag_class.name(),
        });
    }
    Ok(())
}

fn expect_tag(element: &Element, expected: u64, type_name: &'static str) -> Asn1Result<()> {
    expect_context(element, type_name)?;
    if element.tag_number != expected {
        return Err(Asn1Error::TagNumber {
            type_name,
            expected,
            found: element.tag_number,
        });
    }
    Ok(())
}

/// Decode the two-element SEQUENCE inside the syntaxes and
/// context-negotiation variants, returning the [0] and [1] children
fn choice_pair(choice: &Element, type_name: &'static str) -> Asn1Result<(Element, Element)> {
    if choice.construction != Construction::Constructed {
        return Err(Asn1Error::Construction { type_name, constructed: false });
    }
    let pair: [Element; 2] = children_of(choice.content(), MAX_NESTING_DEPTH)?
        .try_into()
        .map_err(|_| Asn1Error::Value {
            type_name,
            detail: "identification pair must contain exactly two components",
        })?;
    for (index, component) in pair.iter().enumerate() {
        expect_tag(component, index as u64, type_name)?;
        if component.construction != Construction::Primitive {
            return Err(Asn1Error::Construction { type_name, constructed: true });
        }
    }
    let [first, second] = pair;
    Ok((first, second))
}

fn decode_identification(choice: &Element, type_name: &'static str) -> Asn1Result<Identification> {
    expect_context(choice, type_name)?;
    match choice.tag_number {
        0 => {
            let (abstract_syntax, transfer_syntax) = choice_pair(choice, type_name)?;
            Ok(Identification::Syntaxes {
                abstract_syntax: decode_oid_content(abstract_syntax.content(), "OBJECT IDENTIFIER")?,
                transfer_syntax: decode_oid_content(transfer_syntax.content(), "OBJECT IDENTIFIER")?,
            })
        }
        1 => {
            choice_primitive(choice, type_name)?;
            Ok(Identification::Syntax(decode_oid_content(choice.content(), "OBJECT IDENTIFIER")?))
        }
        2 => {
            choice_primitive(choice, type_name)?;
            Ok(Identification::PresentationContextId(decode_integer_content(
                choice.content(),
                "INTEGER",
            )?))
        }
        3 => {
            let (context_id, transfer_syntax) = choice_pair(choice, type_name)?;
            Ok(Identification::ContextNegotiation {
                presentation_context_id: decode_integer_content(context_id.content(), "INTEGER")?,
                transfer_syntax: decode_oid_content(transfer_syntax.content(), "OBJECT IDENTIFIER")?,
            })
        }
        4 => {
            choice_primitive(choice, type_name)?;
            Ok(Identification::TransferSyntax(decode_oid_content(
                choice.content(),
                "OBJECT IDENTIFIER",
            )?))
        }
        5 => {
            choice_primitive(choice, type_name)?;
            if !choice.content().is_empty() {
                return Err(Asn1Error::ValueSize {
                    type_name,
                    min: 0,
                    max: 0,
                    actual: choice.content().len(),
                });
            }
            Ok(Identification::Fixed)
        }
        _ => Err(Asn1Error::Value { type_name, detail: "unknown identification choice" }),
    }
}

fn choice_primitive(choice: &Element, type_name: &'static str) -> Asn1Result<()> {
    if choice.construction != Construction::Primitive {
        return Err(Asn1Error::Construction { type_name, constructed: true });
    }
    Ok(())
}

fn encode_identification(identification: &Identification) -> Element {
    fn oid_component(tag: u64, oid: &Oid) -> Element {
        element_with(TagClass::ContextSpecific, Construction::Primitive, tag, encode_oid_content(oid))
    }
    fn integer_component(tag: u64, value: i64) -> Element {
        element_with(
            TagClass::ContextSpecific,
            Construction::Primitive,
            tag,
            encode_integer_content(value),
        )
    }

    let tag = identification.choice_tag();
    match identification {
        Identification::Syntaxes { abstract_syntax, transfer_syntax } => {
            let pair = [oid_component(0, abstract_syntax), oid_component(1, transfer_syntax)];
            element_with(TagClass::ContextSpecific, Construction::Constructed, tag, concat_children(&pair))
        }
        Identification::Syntax(oid) => oid_component(tag, oid),
        Identification::PresentationContextId(id) => integer_component(tag, *id),
        Identification::ContextNegotiation { presentation_context_id, transfer_syntax } => {
            let pair = [
                integer_component(0, *presentation_context_id),
                oid_component(1, transfer_syntax),
            ];
            element_with(TagClass::ContextSpecific, Construction::Constructed, tag, concat_children(&pair))
        }
        Identification::TransferSyntax(oid) => oid_component(tag, oid),
        Identification::Fixed => {
            element_with(TagClass::ContextSpecific, Construction::Primitive, tag, Vec::new())
        }
    }
}

/// Decode the shared two-child composite shape
pub(crate) fn decode_pdv_components(
    element: &Element,
    type_name: &'static str,
) -> Asn1Result<(Identification, Vec<u8>)> {
    expect_constructed(element, type_name)?;
    let children = children_of(element.content(), MAX_NESTING_DEPTH)?;
    if children.len() != 2 {
        return Err(Asn1Error::Value {
            type_name,
            detail: "must contain exactly two components",
        });
    }
    expect_tag(&children[0], 0, type_name)?;
    if children[0].construction != Construction::Constructed {
        return Err(Asn1Error::Construction { type_name, constructed: false });
    }
    let (choice, used) = Element::parse(children[0].content())?;
    if used != children[0].content().len() {
        return Err(Asn1Error::Value {
            type_name,
            detail: "trailing octets after the identification choice",
        });
    }
    let identification = decode_identification(&choice, type_name)?;

    expect_tag(&children[1], 2, type_name)?;
    Ok((identification, children[1].content().to_vec()))
}

/// Encode the shared two-child composite shape
pub(crate) fn encode_pdv_components(identification: &Identification, payload: &[u8]) -> Vec<u8> {
    let choice = encode_identification(identification);
    let children = [
        element_with(
            TagClass::ContextSpecific,
            Construction::Constructed,
            0,
            choice.to_bytes().to_vec(),
        ),
        element_with(TagClass::ContextSpecific, Construction::Primitive, 2, payload.to_vec()),
    ];
    concat_children(&children)
}

impl Element {
    /// Read the content as an EmbeddedPDV value
    ///
    /// # Errors
    ///
    /// `Construction`, `TagClass`, `TagNumber` and `Value` on any departure
    /// from the two-child AUTOMATIC TAGS shape described above.
    pub fn embedded_pdv(&self) -> Asn1Result<EmbeddedPdv> {
        let (identification, data_value) = decode_pdv_components(self, "EmbeddedPDV")?;
        Ok(EmbeddedPdv { identification, data_value })
    }

    /// Store an EmbeddedPDV value
    pub fn set_embedded_pdv(&mut self, value: &EmbeddedPdv) {
        self.construction = Construction::Constructed;
        self.content = encode_pdv_components(&value.identification, &value.data_value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn round_trip(identification: Identification) {
        let mut element = Element::with_tag(TagClass::Universal, Construction::Constructed, 11);
        let value = EmbeddedPdv::new(identification, hex!("DE AD").to_vec());
        element.set_embedded_pdv(&value);
        assert_eq!(element.embedded_pdv().unwrap(), value);
    }

    #[test]
    fn test_round_trip_every_identification_variant() {
        let oid = Oid::new(vec![1, 3, 6, 1]).unwrap();
        round_trip(Identification::Syntaxes {
            abstract_syntax: oid.clone(),
            transfer_syntax: Oid::basic_encoding_rules(),
        });
        round_trip(Identification::Syntax(oid.clone()));
        round_trip(Identification::PresentationContextId(27));
        round_trip(Identification::ContextNegotiation {
            presentation_context_id: -5,
            transfer_syntax: oid.clone(),
        });
        round_trip(Identification::TransferSyntax(oid));
        round_trip(Identification::Fixed);
    }

    #[test]
    fn test_wire_shape_of_presentation_context_id() {
        let mut element = Element::with_tag(TagClass::Universal, Construction::Constructed, 11);
        element.set_embedded_pdv(&EmbeddedPdv::new(
            Identification::PresentationContextId(27),
            hex!("AA").to_vec(),
        ));
        // [0] wrapping choice [2] carrying 27, then [2] payload.
        assert_eq!(element.to_bytes().as_ref(), hex!("2B 08 A0 03 82 01 1B 82 01 AA"));
    }

    #[test]
    fn test_decode_syntaxes_variant() {
        // [0] { [0] { [0] OID 2.1.1, [1] OID 2.1.1 } }, [2] empty payload.
        let input = hex!("2B 0E A0 0A A0 08 80 02 51 01 81 02 51 01 82 00");
        let (element, _) = Element::parse(&input).unwrap();
        let value = element.embedded_pdv().unwrap();
        assert_eq!(
            value.identification,
            Identification::Syntaxes {
                abstract_syntax: Oid::basic_encoding_rules(),
                transfer_syntax: Oid::basic_encoding_rules(),
            }
        );
        assert!(value.data_value.is_empty());
    }

    #[test]
    fn test_child_count_enforced() {
        let (element, _) = Element::parse(&hex!("2B 02 82 00")).unwrap();
        assert!(matches!(
            element.embedded_pdv(),
            Err(Asn1Error::Value { detail: "must contain exactly two components", .. })
        ));
    }

    #[test]
    fn test_child_tags_enforced() {
        // First child [1] instead of [0].
        let (element, _) = Element::parse(&hex!("2B 09 A1 05 82 03 02 01 1B 82 00")).unwrap();
        assert_eq!(
            element.embedded_pdv(),
            Err(Asn1Error::TagNumber { type_name: "EmbeddedPDV", expected: 0, found: 1 })
        );
        // Second child [1] instead of [2].
        let (element, _) = Element::parse(&hex!("2B 09 A0 05 82 03 02 01 1B 81 00")).unwrap();
        assert_eq!(
            element.embedded_pdv(),
            Err(Asn1Error::TagNumber { type_name: "EmbeddedPDV", expected: 2, found: 1 })
        );
    }

    #[test]
    fn test_universal_child_class_rejected() {
        let (element, _) = Element::parse(&hex!("2B 09 30 05 82 03 02 01 1B 82 00")).unwrap();
        assert!(matches!(
            element.embedded_pdv(),
            Err(Asn1Error::TagClass { type_name: "EmbeddedPDV", .. })
        ));
    }

    #[test]
    fn test_unknown_choice_rejected() {
        // Choice tag [6] is outside the CHOICE.
        let (element, _) = Element::parse(&hex!("2B 08 A0 04 86 02 01 1B 82 00")).unwrap();
        assert!(matches!(
            element.embedded_pdv(),
            Err(Asn1Error::Value { detail: "unknown identification choice", .. })
        ));
    }

    #[test]
    fn test_fixed_variant_must_be_empty() {
        let (element, _) = Element::parse(&hex!("2B 08 A0 04 85 02 00 00 82 00")).unwrap();
        assert!(matches!(element.embedded_pdv(), Err(Asn1Error::ValueSize { .. })));
    }

    #[test]
    fn test_negotiation_pair_tags_enforced() {
        // Pair tagged [0],[2] instead of [0],[1].
        let input = hex!("2B 0C A0 08 A3 06 80 01 05 82 01 2A 82 00");
        let (element, _) = Element::parse(&input).unwrap();
        assert_eq!(
            element.embedded_pdv(),
            Err(Asn1Error::TagNumber { type_name: "EmbeddedPDV", expected: 1, found: 2 })
        );
    }

    #[test]
    fn test_primitive_outer_rejected() {
        let (element, _) = Element::parse(&hex!("0B 00")).unwrap();
        assert!(matches!(
            element.embedded_pdv(),
            Err(Asn1Error::Construction { type_name: "EmbeddedPDV", constructed: false })
        ));
    }
}
