//! OBJECT IDENTIFIER and RELATIVE-OID accessors
//!
//! Arcs after the first two are carried base-128, top bit set on every
//! octet except the last of each arc. The first content octet folds the
//! first two arcs together: 40 * arc0 + arc1 for roots 0 and 1, 80 + arc1
//! for root 2.

use asn1_core::{Asn1Error, Asn1Result, Oid};

use crate::element::Element;
use crate::tag::Construction;
use crate::value::expect_primitive;

/// Decode a run of base-128 arcs
///
/// # Errors
///
/// `ValuePadding` when an arc starts with the redundant octet 0x80,
/// `Truncation` when the final arc has no terminating octet, and
/// `ValueOverflow` when an arc exceeds a machine word.
pub(crate) fn decode_base128_arcs(bytes: &[u8], type_name: &'static str) -> Asn1Result<Vec<u64>> {
    let mut arcs = Vec::new();
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] == 0x80 {
            return Err(Asn1Error::ValuePadding { type_name, octet: 0x80 });
        }
        let mut arc: u64 = 0;
        loop {
            let byte = *bytes.get(index).ok_or(Asn1Error::Truncation {
                context: "base-128 arc",
                needed: index + 1,
                available: bytes.len(),
            })?;
            index += 1;
            if arc > u64::MAX >> 7 {
                return Err(Asn1Error::ValueOverflow { type_name });
            }
            arc = (arc << 7) | (byte & 0x7F) as u64;
            if byte & 0x80 == 0 {
                break;
            }
        }
        arcs.push(arc);
    }
    Ok(arcs)
}

/// Encode one arc in the fewest base-128 octets
pub(crate) fn encode_base128_arc(arc: u64, out: &mut Vec<u8>) {
    let septets = if arc == 0 { 1 } else { (70 - arc.leading_zeros() as usize) / 7 };
    for i in (1..septets).rev() {
        out.push(0x80 | ((arc >> (i * 7)) & 0x7F) as u8);
    }
    out.push((arc & 0x7F) as u8);
}

/// Decode OBJECT IDENTIFIER content octets
pub(crate) fn decode_oid_content(content: &[u8], type_name: &'static str) -> Asn1Result<Oid> {
    let first = *content.first().ok_or(Asn1Error::Length {
        type_name,
        detail: "content cannot be empty",
    })?;
    let (arc0, arc1) = if first >= 0x50 {
        (2, (first - 80) as u64)
    } else if first >= 0x28 {
        (1, (first - 40) as u64)
    } else {
        (0, first as u64)
    };
    let mut arcs = vec![arc0, arc1];
    arcs.extend(decode_base128_arcs(&content[1..], type_name)?);
    Oid::new(arcs)
}

/// Encode OBJECT IDENTIFIER content octets
pub(crate) fn encode_oid_content(oid: &Oid) -> Vec<u8> {
    let arcs = oid.arcs();
    let first = match arcs[0] {
        2 => 80 + arcs[1],
        root => 40 * root + arcs[1],
    };
    let mut out = vec![first as u8];
    for &arc in &arcs[2..] {
        encode_base128_arc(arc, &mut out);
    }
    out
}

impl Element {
    /// Read the content as an OBJECT IDENTIFIER
    ///
    /// # Errors
    ///
    /// `Construction` on a constructed element, `Length` on empty content,
    /// `ValuePadding` on a 0x80 lead-in octet, `Truncation` on an
    /// unterminated final arc, `ValueOverflow` on arcs beyond a machine
    /// word.
    pub fn object_identifier(&self) -> Asn1Result<Oid> {
        expect_primitive(self, "OBJECT IDENTIFIER")?;
        decode_oid_content(&self.content, "OBJECT IDENTIFIER")
    }

    /// Store an OBJECT IDENTIFIER
    pub fn set_object_identifier(&mut self, oid: &Oid) {
        self.construction = Construction::Primitive;
        self.content = encode_oid_content(oid);
    }

    /// Read the content as a RELATIVE-OID: base-128 arcs with no folding
    pub fn relative_oid(&self) -> Asn1Result<Vec<u64>> {
        expect_primitive(self, "RELATIVE OID")?;
        decode_base128_arcs(&self.content, "RELATIVE OID")
    }

    /// Store a RELATIVE-OID
    pub fn set_relative_oid(&mut self, arcs: &[u64]) {
        self.construction = Construction::Primitive;
        let mut content = Vec::new();
        for &arc in arcs {
            encode_base128_arc(arc, &mut content);
        }
        self.content = content;
    }
}
