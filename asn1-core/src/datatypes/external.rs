//! EXTERNAL value record

use crate::datatypes::identification::Identification;
use serde::{Deserialize, Serialize};

/// How the data value of an EXTERNAL is encoded
///
/// Maps to the context-specific tag of the final component of the
/// pre-1994 EXTERNAL SEQUENCE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExternalEncoding {
    /// The value of a single ASN.1 type (tag 0)
    SingleAsn1Type,
    /// An octet-aligned bit stream (tag 1)
    OctetAligned,
    /// An arbitrary bit stream (tag 2)
    Arbitrary,
}

impl ExternalEncoding {
    /// Map a context-specific tag number to the encoding choice
    pub fn from_tag(tag: u64) -> Option<Self> {
        match tag {
            0 => Some(ExternalEncoding::SingleAsn1Type),
            1 => Some(ExternalEncoding::OctetAligned),
            2 => Some(ExternalEncoding::Arbitrary),
            _ => None,
        }
    }

    /// The context-specific tag number of this choice
    pub fn tag(self) -> u64 {
        match self {
            ExternalEncoding::SingleAsn1Type => 0,
            ExternalEncoding::OctetAligned => 1,
            ExternalEncoding::Arbitrary => 2,
        }
    }
}

/// EXTERNAL: a value of some externally defined type together with the
/// identification of its encoding
///
/// Only the `Syntax`, `PresentationContextId` and `ContextNegotiation`
/// identification variants are expressible in the pre-1994 EXTERNAL
/// encoding; the codec rejects the others at encode time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct External {
    /// How the receiving side identifies the embedded encoding
    pub identification: Identification,
    /// Optional human-readable descriptor of the value
    pub data_value_descriptor: Option<String>,
    /// The embedded data value, as raw content octets
    #[serde(with = "serde_bytes")]
    pub data_value: Vec<u8>,
    /// Which encoding-choice component carries the data value
    pub encoding: ExternalEncoding,
}

impl External {
    /// Create an EXTERNAL with an octet-aligned data value and no descriptor
    pub fn new(identification: Identification, data_value: Vec<u8>) -> Self {
        Self {
            identification,
            data_value_descriptor: None,
            data_value,
            encoding: ExternalEncoding::OctetAligned,
        }
    }
}
