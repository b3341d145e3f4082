//! Unrestricted CHARACTER STRING value record

use crate::datatypes::identification::Identification;
use serde::{Deserialize, Serialize};

/// Unrestricted CHARACTER STRING: characters from a negotiated repertoire,
/// carried with the identification of their encoding
///
/// Unlike the restricted string types, the character repertoire is not fixed
/// by the ASN.1 type, so the string value stays an opaque byte sequence at
/// this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterString {
    /// How the receiving side identifies the character encoding
    pub identification: Identification,
    /// The encoded string value
    #[serde(with = "serde_bytes")]
    pub string_value: Vec<u8>,
}

impl CharacterString {
    /// Create a CHARACTER STRING
    pub fn new(identification: Identification, string_value: Vec<u8>) -> Self {
        Self { identification, string_value }
    }
}
