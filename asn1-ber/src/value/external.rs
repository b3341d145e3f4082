//! EXTERNAL accessor
//!
//! EXTERNAL still uses the sequence shape X.690 8.18 froze before 1994: up
//! to three universal-class components naming the encoding, then one
//! context-specific component (tag 0, 1 or 2) carrying the data value. The
//! prefix components are an OBJECT IDENTIFIER, an INTEGER and an
//! ObjectDescriptor, in that order, each at most once; which subset is
//! present determines the identification variant.

use asn1_core::{Asn1Error, Asn1Result, External, ExternalEncoding, Identification, Oid};

use crate::element::{Element, MAX_NESTING_DEPTH};
use crate::tag::{Construction, TagClass, UniversalTag};
use crate::value::integer::{decode_integer_content, encode_integer_content};
use crate::value::object_identifier::{decode_oid_content, encode_oid_content};
use crate::value::{children_of, concat_children, element_with, expect_constructed};

fn component_oid(component: &Element) -> Asn1Result<Oid> {
    decode_oid_content(component.content(), "OBJECT IDENTIFIER")
}

fn component_integer(component: &Element) -> Asn1Result<i64> {
    decode_integer_content(component.content(), "INTEGER")
}

impl Element {
    /// Read the content as an EXTERNAL value
    ///
    /// # Errors
    ///
    /// `Construction` on a primitive element or a constructed prefix
    /// component, `TagClass` on misplaced classes, `Value` on component
    /// counts outside 2-4, duplicate prefix components, layouts the
    /// standard does not define, or an encoding-choice tag above 2.
    pub fn external(&self) -> Asn1Result<External> {
        expect_constructed(self, "EXTERNAL")?;
        let children = children_of(self.content(), MAX_NESTING_DEPTH)?;
        if !(2..=4).contains(&children.len()) {
            return Err(Asn1Error::Value {
                type_name: "EXTERNAL",
                detail: "must contain two to four components",
            });
        }

        let data_component = &children[children.len() - 1];
        if data_component.tag_class != TagClass::ContextSpecific {
            return Err(Asn1Error::TagClass {
                type_name: "EXTERNAL",
                expected: "context-specific",
                found: data_component.tag_class.name(),
            });
        }
        let encoding = ExternalEncoding::from_tag(data_component.tag_number).ok_or(
            Asn1Error::Value {
                type_name: "EXTERNAL",
                detail: "encoding choice tag must be 0, 1 or 2",
            },
        )?;

        let prefix = &children[..children.len() - 1];
        for component in prefix {
            if component.tag_class != TagClass::Universal {
                return Err(Asn1Error::TagClass {
                    type_name: "EXTERNAL",
                    expected: "universal",
                    found: component.tag_class.name(),
                });
            }
            if component.construction == Construction::Constructed {
                return Err(Asn1Error::Construction { type_name: "EXTERNAL", constructed: true });
            }
        }
        let numbers: Vec<u64> = prefix.iter().map(|c| c.tag_number).collect();
        for (i, number) in numbers.iter().enumerate() {
            if numbers[..i].contains(number) {
                return Err(Asn1Error::Value {
                    type_name: "EXTERNAL",
                    detail: "duplicate component",
                });
            }
        }

        const OID: u64 = UniversalTag::ObjectIdentifier.number();
        const INT: u64 = UniversalTag::Integer.number();
        const DESC: u64 = UniversalTag::ObjectDescriptor.number();

        let (identification, data_value_descriptor) = match numbers.as_slice() {
            [OID] => (Identification::Syntax(component_oid(&prefix[0])?), None),
            [INT] => (
                Identification::PresentationContextId(component_integer(&prefix[0])?),
                None,
            ),
            [OID, DESC] => (
                Identification::Syntax(component_oid(&prefix[0])?),
                Some(prefix[1].object_descriptor()?),
            ),
            [INT, DESC] => (
                Identification::PresentationContextId(component_integer(&prefix[0])?),
                Some(prefix[1].object_descriptor()?),
            ),
            [OID, INT] => (
                Identification::ContextNegotiation {
                    presentation_context_id: component_integer(&prefix[1])?,
                    transfer_syntax: component_oid(&prefix[0])?,
                },
                None,
            ),
            [OID, INT, DESC] => (
                Identification::ContextNegotiation {
                    presentation_context_id: component_integer(&prefix[1])?,
                    transfer_syntax: component_oid(&prefix[0])?,
                },
                Some(prefix[2].object_descriptor()?),
            ),
            _ => {
                return Err(Asn1Error::Value {
                    type_name: "EXTERNAL",
                    detail: "unrecognized component layout",
                });
            }
        };

        Ok(External {
            identification,
            data_value_descriptor,
            data_value: data_component.content().to_vec(),
            encoding,
        })
    }

    /// Store an EXTERNAL value
    ///
    /// # Errors
    ///
    /// `Value` if the identification variant has no pre-1994 rendering
    /// (`Syntaxes`, `TransferSyntax` and `Fixed` do not), `ValueCharacters`
    /// if the descriptor strays outside printable ASCII.
    pub fn set_external(&mut self, value: &External) -> Asn1Result<()> {
        let mut children = Vec::new();
        match &value.identification {
            Identification::Syntax(oid) => {
                children.push(element_with(
                    TagClass::Universal,
                    Construction::Primitive,
                    UniversalTag::ObjectIdentifier.number(),
                    encode_oid_content(oid),
                ));
            }
            Identification::PresentationContextId(id) => {
                children.push(element_with(
                    TagClass::Universal,
                    Construction::Primitive,
                    UniversalTag::Integer.number(),
                    encode_integer_content(*id),
                ));
            }
            Identification::ContextNegotiation { presentation_context_id, transfer_syntax } => {
                children.push(element_with(
                    TagClass::Universal,
                    Construction::Primitive,
                    UniversalTag::ObjectIdentifier.number(),
                    encode_oid_content(transfer_syntax),
                ));
                children.push(element_with(
                    TagClass::Universal,
                    Construction::Primitive,
                    UniversalTag::Integer.number(),
                    encode_integer_content(*presentation_context_id),
                ));
            }
            _ => {
                return Err(Asn1Error::Value {
                    type_name: "EXTERNAL",
                    detail: "identification not expressible in the pre-1994 encoding",
                });
            }
        }
        if let Some(descriptor) = &value.data_value_descriptor {
            let mut component = Element::with_tag(
                TagClass::Universal,
                Construction::Primitive,
                UniversalTag::ObjectDescriptor.number(),
            );
            component.set_object_descriptor(descriptor)?;
            children.push(component);
        }
        let data_construction = if value.encoding == ExternalEncoding::SingleAsn1Type {
            Construction::Constructed
        } else {
            Construction::Primitive
        };
        children.push(element_with(
            TagClass::ContextSpecific,
            data_construction,
            value.encoding.tag(),
            value.data_value.clone(),
        ));

        self.construction = Construction::Constructed;
        self.content = concat_children(&children);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn decode(bytes: &[u8]) -> Asn1Result<External> {
        Element::parse(bytes).unwrap().0.external()
    }

    #[test]
    fn test_two_components_with_presentation_context() {
        let external = decode(&hex!("28 06 02 01 1B 81 01 AA")).unwrap();
        assert_eq!(external.identification, Identification::PresentationContextId(27));
        assert_eq!(external.data_value_descriptor, None);
        assert_eq!(external.data_value, hex!("AA"));
        assert_eq!(external.encoding, ExternalEncoding::OctetAligned);
    }

    #[test]
    fn test_two_components_with_syntax() {
        let external = decode(&hex!("28 08 06 03 2A 03 04 82 01 F0")).unwrap();
        assert_eq!(
            external.identification,
            Identification::Syntax(Oid::new(vec![1, 2, 3, 4]).unwrap())
        );
        assert_eq!(external.encoding, ExternalEncoding::Arbitrary);
    }

    #[test]
    fn test_context_negotiation_layout() {
        let external = decode(&hex!("28 0C 06 03 2A 03 04 02 01 05 80 02 30 00")).unwrap();
        assert_eq!(
            external.identification,
            Identification::ContextNegotiation {
                presentation_context_id: 5,
                transfer_syntax: Oid::new(vec![1, 2, 3, 4]).unwrap(),
            }
        );
        assert_eq!(external.encoding, ExternalEncoding::SingleAsn1Type);
    }

    #[test]
    fn test_four_components() {
        // OID, INTEGER, ObjectDescriptor, data value.
        let external = decode(&hex!("28 0F 06 03 2A 03 04 02 01 05 07 02 68 69 81 01 AA")).unwrap();
        assert_eq!(external.data_value_descriptor.as_deref(), Some("hi"));
        assert!(matches!(
            external.identification,
            Identification::ContextNegotiation { presentation_context_id: 5, .. }
        ));
    }

    #[test]
    fn test_descriptor_with_syntax() {
        let external = decode(&hex!("28 0C 06 03 2A 03 04 07 02 68 69 81 01 AA")).unwrap();
        assert_eq!(external.data_value_descriptor.as_deref(), Some("hi"));
        assert!(matches!(external.identification, Identification::Syntax(_)));
    }

    #[test]
    fn test_component_count_enforced() {
        assert!(matches!(
            decode(&hex!("28 03 81 01 AA")),
            Err(Asn1Error::Value { detail: "must contain two to four components", .. })
        ));
        assert!(matches!(
            decode(&hex!("28 0F 02 01 05 02 01 05 02 01 05 02 01 05 81 01 AA")),
            Err(Asn1Error::Value { detail: "must contain two to four components", .. })
        ));
    }

    #[test]
    fn test_duplicate_components_rejected() {
        assert!(matches!(
            decode(&hex!("28 09 02 01 05 02 01 06 81 01 AA")),
            Err(Asn1Error::Value { detail: "duplicate component", .. })
        ));
    }

    #[test]
    fn test_unknown_layout_rejected() {
        // Descriptor alone cannot identify the encoding.
        assert!(matches!(
            decode(&hex!("28 07 07 02 68 69 81 01 AA")),
            Err(Asn1Error::Value { detail: "unrecognized component layout", .. })
        ));
        // INTEGER before OID violates the fixed order.
        assert!(matches!(
            decode(&hex!("28 0B 02 01 05 06 03 2A 03 04 81 01 AA")),
            Err(Asn1Error::Value { detail: "unrecognized component layout", .. })
        ));
    }

    #[test]
    fn test_last_component_class_and_tag_enforced() {
        assert!(matches!(
            decode(&hex!("28 06 02 01 05 04 01 AA")),
            Err(Asn1Error::TagClass { type_name: "EXTERNAL", .. })
        ));
        assert!(matches!(
            decode(&hex!("28 06 02 01 05 83 01 AA")),
            Err(Asn1Error::Value { detail: "encoding choice tag must be 0, 1 or 2", .. })
        ));
    }

    #[test]
    fn test_constructed_prefix_component_rejected() {
        assert!(matches!(
            decode(&hex!("28 07 22 02 02 05 81 01 AA")),
            Err(Asn1Error::Construction { type_name: "EXTERNAL", constructed: true })
        ));
    }

    #[test]
    fn test_primitive_outer_rejected() {
        let (element, _) = Element::parse(&hex!("08 00")).unwrap();
        assert!(matches!(
            element.external(),
            Err(Asn1Error::Construction { type_name: "EXTERNAL", constructed: false })
        ));
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let mut element = Element::with_tag(TagClass::Universal, Construction::Constructed, 8);
        let mut value = External::new(Identification::PresentationContextId(27), vec![0xAA]);
        value.data_value_descriptor = Some("payload".to_string());
        element.set_external(&value).unwrap();
        assert_eq!(element.external().unwrap(), value);

        let negotiated = External {
            identification: Identification::ContextNegotiation {
                presentation_context_id: -3,
                transfer_syntax: Oid::new(vec![2, 1, 1]).unwrap(),
            },
            data_value_descriptor: None,
            data_value: hex!("30 00").to_vec(),
            encoding: ExternalEncoding::SingleAsn1Type,
        };
        element.set_external(&negotiated).unwrap();
        assert_eq!(element.external().unwrap(), negotiated);
    }

    #[test]
    fn test_encode_rejects_inexpressible_identification() {
        let mut element = Element::new();
        let value = External::new(Identification::Fixed, vec![]);
        assert!(matches!(
            element.set_external(&value),
            Err(Asn1Error::Value { detail: "identification not expressible in the pre-1994 encoding", .. })
        ));
    }
}
