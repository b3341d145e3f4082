//! Restricted and unrestricted character string accessors
//!
//! Every string type shares the octet-string wire shape and the
//! constructed-form reassembly rules; they differ only in which octet
//! sequences are legal. The repertoire checks run on the reassembled
//! content, so a value split across segments is validated as a whole.
//!
//! TeletexString and VideotexString escape validation entirely: their
//! repertoires are negotiated via escape sequences this codec does not
//! model, so they stay raw bytes.

use asn1_core::{Asn1Error, Asn1Result};

use crate::element::Element;
use crate::tag::Construction;
use crate::value::reassembled_content;

fn is_numeric(byte: u8) -> bool {
    byte == b' ' || byte.is_ascii_digit()
}

fn is_printable(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b' ' | b'\'' | b'(' | b')' | b'+' | b',' | b'-' | b'.' | b'/' | b':' | b'=' | b'?'
        )
}

fn is_seven_bit(byte: u8) -> bool {
    byte < 0x80
}

fn is_graphic(byte: u8) -> bool {
    (0x20..=0x7E).contains(&byte)
}

fn check_repertoire(
    bytes: &[u8],
    type_name: &'static str,
    permitted: fn(u8) -> bool,
) -> Asn1Result<()> {
    for (position, &octet) in bytes.iter().enumerate() {
        if !permitted(octet) {
            return Err(Asn1Error::ValueCharacters { type_name, octet, position });
        }
    }
    Ok(())
}

/// Decode a restricted ASCII string from already-reassembled bytes
pub(crate) fn decode_restricted(
    bytes: Vec<u8>,
    type_name: &'static str,
    permitted: fn(u8) -> bool,
) -> Asn1Result<String> {
    check_repertoire(&bytes, type_name, permitted)?;
    Ok(bytes.into_iter().map(char::from).collect())
}

fn restricted(
    element: &Element,
    type_name: &'static str,
    permitted: fn(u8) -> bool,
) -> Asn1Result<String> {
    let bytes = reassembled_content(element, type_name)?;
    decode_restricted(bytes, type_name, permitted)
}

fn set_restricted(
    element: &mut Element,
    value: &str,
    type_name: &'static str,
    permitted: fn(u8) -> bool,
) -> Asn1Result<()> {
    check_repertoire(value.as_bytes(), type_name, permitted)?;
    element.construction = Construction::Primitive;
    element.content = value.as_bytes().to_vec();
    Ok(())
}

impl Element {
    /// Read the content as a UTF8String
    ///
    /// # Errors
    ///
    /// `ValueCharacters` at the first byte that is not valid UTF-8.
    pub fn utf8_string(&self) -> Asn1Result<String> {
        let bytes = reassembled_content(self, "UTF8String")?;
        String::from_utf8(bytes).map_err(|e| {
            let position = e.utf8_error().valid_up_to();
            Asn1Error::ValueCharacters {
                type_name: "UTF8String",
                octet: e.as_bytes()[position],
                position,
            }
        })
    }

    /// Store a UTF8String
    pub fn set_utf8_string(&mut self, value: &str) {
        self.construction = Construction::Primitive;
        self.content = value.as_bytes().to_vec();
    }

    /// Read the content as a NumericString: digits and space
    pub fn numeric_string(&self) -> Asn1Result<String> {
        restricted(self, "NumericString", is_numeric)
    }

    /// Store a NumericString
    ///
    /// # Errors
    ///
    /// `ValueCharacters` if `value` strays outside digits and space.
    pub fn set_numeric_string(&mut self, value: &str) -> Asn1Result<()> {
        set_restricted(self, value, "NumericString", is_numeric)
    }

    /// Read the content as a PrintableString
    pub fn printable_string(&self) -> Asn1Result<String> {
        restricted(self, "PrintableString", is_printable)
    }

    /// Store a PrintableString
    ///
    /// # Errors
    ///
    /// `ValueCharacters` outside the X.680 printable repertoire.
    pub fn set_printable_string(&mut self, value: &str) -> Asn1Result<()> {
        set_restricted(self, value, "PrintableString", is_printable)
    }

    /// Read the content as a TeletexString, unvalidated
    pub fn teletex_string(&self) -> Asn1Result<Vec<u8>> {
        reassembled_content(self, "TeletexString")
    }

    /// Store a TeletexString
    pub fn set_teletex_string(&mut self, value: &[u8]) {
        self.construction = Construction::Primitive;
        self.content = value.to_vec();
    }

    /// Read the content as a VideotexString, unvalidated
    pub fn videotex_string(&self) -> Asn1Result<Vec<u8>> {
        reassembled_content(self, "VideotexString")
    }

    /// Store a VideotexString
    pub fn set_videotex_string(&mut self, value: &[u8]) {
        self.construction = Construction::Primitive;
        self.content = value.to_vec();
    }

    /// Read the content as an IA5String: the 128 characters of IA5
    pub fn ia5_string(&self) -> Asn1Result<String> {
        restricted(self, "IA5String", is_seven_bit)
    }

    /// Store an IA5String
    ///
    /// # Errors
    ///
    /// `ValueCharacters` on bytes above 0x7F.
    pub fn set_ia5_string(&mut self, value: &str) -> Asn1Result<()> {
        set_restricted(self, value, "IA5String", is_seven_bit)
    }

    /// Read the content as a GraphicString: printable ASCII
    pub fn graphic_string(&self) -> Asn1Result<String> {
        restricted(self, "GraphicString", is_graphic)
    }

    /// Store a GraphicString
    ///
    /// # Errors
    ///
    /// `ValueCharacters` outside 0x20-0x7E.
    pub fn set_graphic_string(&mut self, value: &str) -> Asn1Result<()> {
        set_restricted(self, value, "GraphicString", is_graphic)
    }

    /// Read the content as a VisibleString: printable ASCII
    pub fn visible_string(&self) -> Asn1Result<String> {
        restricted(self, "VisibleString", is_graphic)
    }

    /// Store a VisibleString
    ///
    /// # Errors
    ///
    /// `ValueCharacters` outside 0x20-0x7E.
    pub fn set_visible_string(&mut self, value: &str) -> Asn1Result<()> {
        set_restricted(self, value, "VisibleString", is_graphic)
    }

    /// Read the content as a GeneralString
    ///
    /// Validated as seven-bit, like IA5String; the escape-switched
    /// repertoires are not modelled.
    pub fn general_string(&self) -> Asn1Result<String> {
        restricted(self, "GeneralString", is_seven_bit)
    }

    /// Store a GeneralString
    ///
    /// # Errors
    ///
    /// `ValueCharacters` on bytes above 0x7F.
    pub fn set_general_string(&mut self, value: &str) -> Asn1Result<()> {
        set_restricted(self, value, "GeneralString", is_seven_bit)
    }

    /// Read the content as an ObjectDescriptor: printable ASCII
    pub fn object_descriptor(&self) -> Asn1Result<String> {
        restricted(self, "ObjectDescriptor", is_graphic)
    }

    /// Store an ObjectDescriptor
    ///
    /// # Errors
    ///
    /// `ValueCharacters` outside 0x20-0x7E.
    pub fn set_object_descriptor(&mut self, value: &str) -> Asn1Result<()> {
        set_restricted(self, value, "ObjectDescriptor", is_graphic)
    }

    /// Read the content as a UniversalString: UTF-32, big-endian
    ///
    /// # Errors
    ///
    /// `Value` unless the length is a multiple of four, `ValueCharacters`
    /// on code points outside Unicode.
    pub fn universal_string(&self) -> Asn1Result<String> {
        let bytes = reassembled_content(self, "UniversalString")?;
        if bytes.len() % 4 != 0 {
            return Err(Asn1Error::Value {
                type_name: "UniversalString",
                detail: "content length not a multiple of four",
            });
        }
        let mut out = String::with_capacity(bytes.len() / 4);
        for (i, chunk) in bytes.chunks_exact(4).enumerate() {
            let code = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            let ch = char::from_u32(code).ok_or(Asn1Error::ValueCharacters {
                type_name: "UniversalString",
                octet: chunk[0],
                position: i * 4,
            })?;
            out.push(ch);
        }
        Ok(out)
    }

    /// Store a UniversalString
    pub fn set_universal_string(&mut self, value: &str) {
        self.construction = Construction::Primitive;
        let mut content = Vec::with_capacity(value.chars().count() * 4);
        for ch in value.chars() {
            content.extend_from_slice(&(ch as u32).to_be_bytes());
        }
        self.content = content;
    }

    /// Read the content as a BMPString: UTF-16, big-endian, no surrogates
    ///
    /// # Errors
    ///
    /// `Value` unless the length is even, `ValueCharacters` on surrogate
    /// code units.
    pub fn bmp_string(&self) -> Asn1Result<String> {
        let bytes = reassembled_content(self, "BMPString")?;
        if bytes.len() % 2 != 0 {
            return Err(Asn1Error::Value {
                type_name: "BMPString",
                detail: "content length not a multiple of two",
            });
        }
        let mut out = String::with_capacity(bytes.len() / 2);
        for (i, chunk) in bytes.chunks_exact(2).enumerate() {
            let code = u16::from_be_bytes([chunk[0], chunk[1]]);
            let ch = char::from_u32(code as u32).ok_or(Asn1Error::ValueCharacters {
                type_name: "BMPString",
                octet: chunk[0],
                position: i * 2,
            })?;
            out.push(ch);
        }
        Ok(out)
    }

    /// Store a BMPString
    ///
    /// # Errors
    ///
    /// `Value` on characters outside the basic multilingual plane.
    pub fn set_bmp_string(&mut self, value: &str) -> Asn1Result<()> {
        let mut content = Vec::with_capacity(value.chars().count() * 2);
        for ch in value.chars() {
            let code = ch as u32;
            if code > 0xFFFF {
                return Err(Asn1Error::Value {
                    type_name: "BMPString",
                    detail: "character outside the basic multilingual plane",
                });
            }
            content.extend_from_slice(&(code as u16).to_be_bytes());
        }
        self.construction = Construction::Primitive;
        self.content = content;
        Ok(())
    }
}
