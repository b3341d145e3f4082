//! Bit string value type

use crate::error::{Asn1Error, Asn1Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Arbitrary string of bits
///
/// The payload is stored MSB-first: bit 0 is the most significant bit of the
/// first byte. The number of bits may stop short of the final byte boundary
/// by up to seven bits, matching what the BER BIT STRING encoding can carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitString {
    #[serde(with = "serde_bytes")]
    bytes: Vec<u8>,
    num_bits: usize,
}

impl BitString {
    /// Construct a bit string from a byte payload and a bit count
    ///
    /// # Errors
    ///
    /// Returns `Asn1Error::Value` if `num_bits` does not land inside the
    /// final byte of `bytes` (or if it is non-zero while `bytes` is empty).
    pub fn new(bytes: Vec<u8>, num_bits: usize) -> Asn1Result<Self> {
        let capacity = bytes.len() * 8;
        if num_bits > capacity {
            return Err(Asn1Error::Value {
                type_name: "BIT STRING",
                detail: "bit count exceeds the payload capacity",
            });
        }
        if capacity - num_bits > 7 {
            return Err(Asn1Error::Value {
                type_name: "BIT STRING",
                detail: "more than seven trailing bits unused",
            });
        }
        Ok(Self { bytes, num_bits })
    }

    /// The empty bit string
    pub fn empty() -> Self {
        Self { bytes: Vec::new(), num_bits: 0 }
    }

    /// Construct from individual bits, MSB-first
    pub fn from_bits(bits: &[bool]) -> Self {
        let mut bytes = vec![0u8; bits.len().div_ceil(8)];
        for (i, &bit) in bits.iter().enumerate() {
            if bit {
                bytes[i / 8] |= 1 << (7 - (i % 8));
            }
        }
        Self { bytes, num_bits: bits.len() }
    }

    /// The payload bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bits in the string
    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    /// Number of unused bits in the final payload byte (0-7)
    pub fn unused_bits(&self) -> u8 {
        (self.bytes.len() * 8 - self.num_bits) as u8
    }

    /// Get the bit at `index`
    ///
    /// # Errors
    ///
    /// Returns `Asn1Error::Value` if `index` is out of bounds.
    pub fn bit(&self, index: usize) -> Asn1Result<bool> {
        if index >= self.num_bits {
            return Err(Asn1Error::Value {
                type_name: "BIT STRING",
                detail: "bit index out of bounds",
            });
        }
        Ok((self.bytes[index / 8] >> (7 - (index % 8))) & 1 == 1)
    }

    /// Set the bit at `index`
    ///
    /// # Errors
    ///
    /// Returns `Asn1Error::Value` if `index` is out of bounds.
    pub fn set_bit(&mut self, index: usize, value: bool) -> Asn1Result<()> {
        if index >= self.num_bits {
            return Err(Asn1Error::Value {
                type_name: "BIT STRING",
                detail: "bit index out of bounds",
            });
        }
        if value {
            self.bytes[index / 8] |= 1 << (7 - (index % 8));
        } else {
            self.bytes[index / 8] &= !(1 << (7 - (index % 8)));
        }
        Ok(())
    }

    /// Concatenate another bit string onto this one
    ///
    /// Used by the constructed-form reassembly in the codec, where only the
    /// final segment may end off a byte boundary.
    pub fn concat(&mut self, other: &BitString) {
        if self.unused_bits() == 0 {
            self.bytes.extend_from_slice(&other.bytes);
            self.num_bits += other.num_bits;
            return;
        }
        for i in 0..other.num_bits {
            let bit = (other.bytes[i / 8] >> (7 - (i % 8))) & 1 == 1;
            let index = self.num_bits;
            if index % 8 == 0 {
                self.bytes.push(0);
            }
            if bit {
                self.bytes[index / 8] |= 1 << (7 - (index % 8));
            }
            self.num_bits += 1;
        }
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.num_bits {
            let bit = (self.bytes[i / 8] >> (7 - (i % 8))) & 1;
            write!(f, "{bit}")?;
        }
        Ok(())
    }
}
