//! EmbeddedPDV value record

use crate::datatypes::identification::Identification;
use serde::{Deserialize, Serialize};

/// EmbeddedPDV: a presentation data value embedded in another abstract
/// syntax, together with the identification of its encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedPdv {
    /// How the receiving side identifies the embedded encoding
    pub identification: Identification,
    /// The embedded presentation data value
    #[serde(with = "serde_bytes")]
    pub data_value: Vec<u8>,
}

impl EmbeddedPdv {
    /// Create an EmbeddedPDV
    pub fn new(identification: Identification, data_value: Vec<u8>) -> Self {
        Self { identification, data_value }
    }
}
