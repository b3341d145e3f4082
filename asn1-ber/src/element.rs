//! The BER element model
//!
//! An [`Element`] is one decoded TLV: tag class, construction, tag number
//! and owned content octets. Parsing copies content out of the input buffer,
//! so elements never alias or outlive the bytes they were read from, and
//! typed accessors never mutate the element they read.
//!
//! Indefinite-length elements are resolved at parse time: the parser walks
//! the children until the END-OF-CONTENT marker, consumes the marker and
//! stores only the bytes in between. Nesting of indefinite children is
//! bounded by [`MAX_NESTING_DEPTH`]; the remaining budget is threaded down
//! the call stack, so a failed parse cannot leave a stale counter behind.

use asn1_core::{Asn1Error, Asn1Result};
use bytes::{BufMut, Bytes, BytesMut};

use crate::length::{Length, LengthEncoding, length_len, parse_length, write_length};
use crate::tag::{Construction, TagClass, identifier_len, parse_identifier, write_identifier};

/// Upper bound on nested parsing
///
/// Applies to indefinite-length descent, constructed-string reassembly and
/// composite-type decoding. Inputs nested deeper fail with
/// `Asn1Error::Recursion` instead of consuming unbounded stack.
pub const MAX_NESTING_DEPTH: usize = 16;

/// One BER element
///
/// The tag fields and the length-encoding preference are plain public
/// state: tagging is owned by the caller, and assigning a typed value never
/// touches it. The content octets are reachable through [`Element::content`]
/// and the typed accessors.
///
/// # Example
///
/// ```
/// use asn1_ber::Element;
///
/// let (element, used) = Element::parse(&[0x01, 0x01, 0xFF]).unwrap();
/// assert_eq!(used, 3);
/// assert!(element.boolean().unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag class from the identifier octet
    pub tag_class: TagClass,
    /// Construction flag from the identifier octet
    pub construction: Construction,
    /// Tag number, short or long form
    pub tag_number: u64,
    /// Which length form `to_bytes` emits
    pub length_encoding: LengthEncoding,
    pub(crate) content: Vec<u8>,
}

impl Default for Element {
    /// An END-OF-CONTENT placeholder: universal, primitive, tag 0, empty
    fn default() -> Self {
        Self {
            tag_class: TagClass::Universal,
            construction: Construction::Primitive,
            tag_number: 0,
            length_encoding: LengthEncoding::Definite,
            content: Vec::new(),
        }
    }
}

impl Element {
    /// Create an END-OF-CONTENT placeholder element
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an element with the given tag and empty content
    pub fn with_tag(tag_class: TagClass, construction: Construction, tag_number: u64) -> Self {
        Self {
            tag_class,
            construction,
            tag_number,
            length_encoding: LengthEncoding::Definite,
            content: Vec::new(),
        }
    }

    /// The content octets
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Replace the content octets
    pub fn set_content(&mut self, content: Vec<u8>) {
        self.content = content;
    }

    /// Consume the element, returning the content octets
    pub fn into_content(self) -> Vec<u8> {
        self.content
    }

    /// Whether this element is the END-OF-CONTENT marker
    pub fn is_end_of_content(&self) -> bool {
        self.tag_class == TagClass::Universal
            && self.construction == Construction::Primitive
            && self.tag_number == 0
            && self.content.is_empty()
    }

    /// Parse one complete element from the start of `input`
    ///
    /// Returns the element and the number of bytes consumed, including the
    /// header and, for indefinite lengths, the END-OF-CONTENT marker.
    ///
    /// # Errors
    ///
    /// Any of the header failures from the tag and length codecs,
    /// `Truncation` if the declared content overruns the input,
    /// `Construction` if indefinite length is paired with a primitive
    /// element, and `Recursion` if indefinite nesting exceeds
    /// [`MAX_NESTING_DEPTH`].
    pub fn parse(input: &[u8]) -> Asn1Result<(Self, usize)> {
        let parsed = Self::parse_at_depth(input, MAX_NESTING_DEPTH)?;
        log::trace!(
            "parsed {} tag {} element, {} content bytes, {} consumed",
            parsed.0.tag_class.name(),
            parsed.0.tag_number,
            parsed.0.content.len(),
            parsed.1
        );
        Ok(parsed)
    }

    /// Parse one element at `input[*cursor..]`, advancing the cursor
    pub fn parse_cursor(input: &[u8], cursor: &mut usize) -> Asn1Result<Self> {
        let window = input.get(*cursor..).ok_or(Asn1Error::Truncation {
            context: "identifier octet",
            needed: 1,
            available: 0,
        })?;
        let (element, used) = Self::parse(window)?;
        *cursor += used;
        Ok(element)
    }

    /// Parse one element from the front of `input`, consuming its bytes
    pub fn chomp(input: &mut &[u8]) -> Asn1Result<Self> {
        let (element, used) = Self::parse(input)?;
        *input = &input[used..];
        Ok(element)
    }

    pub(crate) fn parse_at_depth(input: &[u8], depth: usize) -> Asn1Result<(Self, usize)> {
        let (tag_class, construction, tag_number, head) = parse_identifier(input)?;
        let (length, length_octets) = parse_length(&input[head..])?;
        let offset = head + length_octets;

        match length {
            Length::Definite(len) => {
                let end = offset
                    .checked_add(len)
                    .ok_or(Asn1Error::LengthOverflow { octets: len })?;
                if end > input.len() {
                    return Err(Asn1Error::Truncation {
                        context: "element content",
                        needed: len,
                        available: input.len() - offset,
                    });
                }
                let element = Self {
                    tag_class,
                    construction,
                    tag_number,
                    length_encoding: LengthEncoding::Definite,
                    content: input[offset..end].to_vec(),
                };
                Ok((element, end))
            }
            Length::Indefinite => {
                if construction == Construction::Primitive {
                    return Err(Asn1Error::Construction {
                        type_name: "indefinite-length element",
                        constructed: false,
                    });
                }
                if depth == 0 {
                    return Err(Asn1Error::Recursion { limit: MAX_NESTING_DEPTH });
                }
                log::trace!("scanning indefinite-length content, {depth} depth levels left");
                let mut cursor = offset;
                loop {
                    let (child, used) = Self::parse_at_depth(&input[cursor..], depth - 1)?;
                    cursor += used;
                    if child.is_end_of_content() {
                        let element = Self {
                            tag_class,
                            construction,
                            tag_number,
                            length_encoding: LengthEncoding::Indefinite,
                            content: input[offset..cursor - used].to_vec(),
                        };
                        return Ok((element, cursor));
                    }
                }
            }
        }
    }

    /// Serialize the element into `out`
    ///
    /// Emits header then content; under the indefinite preference the
    /// END-OF-CONTENT marker follows the content.
    pub fn write(&self, out: &mut BytesMut) {
        write_identifier(self.tag_class, self.construction, self.tag_number, out);
        match self.length_encoding {
            LengthEncoding::Definite => {
                write_length(Length::Definite(self.content.len()), out);
                out.put_slice(&self.content);
            }
            LengthEncoding::Indefinite => {
                write_length(Length::Indefinite, out);
                out.put_slice(&self.content);
                out.put_slice(&[0x00, 0x00]);
            }
        }
    }

    /// Serialize the element to a fresh buffer
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.write(&mut buf);
        buf.freeze()
    }

    /// Number of bytes `to_bytes` produces
    pub fn encoded_len(&self) -> usize {
        let header = identifier_len(self.tag_number)
            + match self.length_encoding {
                LengthEncoding::Definite => length_len(Length::Definite(self.content.len())),
                LengthEncoding::Indefinite => 1,
            };
        let trailer = match self.length_encoding {
            LengthEncoding::Definite => 0,
            LengthEncoding::Indefinite => 2,
        };
        header + self.content.len() + trailer
    }
}
