//! Typed value accessors
//!
//! One module per universal type family. Each module adds a getter/setter
//! pair to [`Element`]: the getter validates and decodes the content octets,
//! the setter replaces them and fixes the construction flag. Neither touches
//! the tag class or number, which belong to the caller.

pub mod bit_string;
pub mod boolean;
pub mod character_string;
pub mod embedded_pdv;
pub mod external;
pub mod integer;
pub mod null;
pub mod object_identifier;
pub mod octet_string;
pub mod real;
pub mod sequence;
pub mod strings;
pub mod time;

use asn1_core::{Asn1Error, Asn1Result};
use bytes::BytesMut;

use crate::element::{Element, MAX_NESTING_DEPTH};
use crate::tag::{Construction, TagClass};

/// Reject constructed elements for types that only exist in primitive form
pub(crate) fn expect_primitive(element: &Element, type_name: &'static str) -> Asn1Result<()> {
    if element.construction == Construction::Constructed {
        return Err(Asn1Error::Construction { type_name, constructed: true });
    }
    Ok(())
}

/// Reject primitive elements for types that only exist in constructed form
pub(crate) fn expect_constructed(element: &Element, type_name: &'static str) -> Asn1Result<()> {
    if element.construction == Construction::Primitive {
        return Err(Asn1Error::Construction { type_name, constructed: false });
    }
    Ok(())
}

/// Parse `content` as a stream of child elements until it is exhausted
pub(crate) fn children_of(content: &[u8], depth: usize) -> Asn1Result<Vec<Element>> {
    let mut rest = content;
    let mut children = Vec::new();
    while !rest.is_empty() {
        let (child, used) = Element::parse_at_depth(rest, depth)?;
        rest = &rest[used..];
        children.push(child);
    }
    Ok(children)
}

/// Concatenate the serialized forms of `children`
pub(crate) fn concat_children(children: &[Element]) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(children.iter().map(Element::encoded_len).sum());
    for child in children {
        child.write(&mut buf);
    }
    buf.to_vec()
}

/// Build a child element in one expression
pub(crate) fn element_with(
    tag_class: TagClass,
    construction: Construction,
    tag_number: u64,
    content: Vec<u8>,
) -> Element {
    let mut element = Element::with_tag(tag_class, construction, tag_number);
    element.set_content(content);
    element
}

/// Content octets of a possibly-constructed string element
///
/// Primitive elements hand back a copy of their content. Constructed
/// elements are reassembled: every child must repeat the outer tag class
/// and number, primitive children contribute their content in order, and
/// constructed children recurse under the shared nesting budget.
pub(crate) fn reassembled_content(element: &Element, type_name: &'static str) -> Asn1Result<Vec<u8>> {
    match element.construction {
        Construction::Primitive => Ok(element.content.clone()),
        Construction::Constructed => {
            let mut out = Vec::with_capacity(element.content.len());
            collect_segments(element, type_name, MAX_NESTING_DEPTH, &mut out)?;
            Ok(out)
        }
    }
}

fn collect_segments(
    element: &Element,
    type_name: &'static str,
    depth: usize,
    out: &mut Vec<u8>,
) -> Asn1Result<()> {
    if depth == 0 {
        return Err(Asn1Error::Recursion { limit: MAX_NESTING_DEPTH });
    }
    for child in children_of(&element.content, depth - 1)? {
        segment_tag_check(element, &child, type_name)?;
        match child.construction {
            Construction::Primitive => out.extend_from_slice(child.content()),
            Construction::Constructed => collect_segments(&child, type_name, depth - 1, out)?,
        }
    }
    Ok(())
}

/// Check that a reassembly child repeats the outer element's tag
pub(crate) fn segment_tag_check(
    outer: &Element,
    child: &Element,
    type_name: &'static str,
) -> Asn1Result<()> {
    if child.tag_class != outer.tag_class {
        return Err(Asn1Error::TagClass {
            type_name,
            expected: outer.tag_class.name(),
            found: child.tag_class.name(),
        });
    }
    if child.tag_number != outer.tag_number {
        return Err(Asn1Error::TagNumber {
            type_name,
            expected: outer.tag_number,
            found: child.tag_number,
        });
    }
    Ok(())
}
