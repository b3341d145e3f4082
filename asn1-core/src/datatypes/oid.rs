//! OBJECT IDENTIFIER container type
//!
//! An object identifier is an ordered list of non-negative integer arcs
//! naming a node in the registration tree of ITU-T X.660. The container
//! enforces the structural rules of the tree root; the wire encoding lives
//! in the `asn1-ber` crate.

use crate::error::{Asn1Error, Asn1Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

fn dotted_form() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+(\.\d+)+$").expect("static pattern"))
}

/// Object identifier: an ordered sequence of non-negative integer arcs
///
/// # Structural rules
///
/// - At least two arcs.
/// - The first arc is 0 (itu-t), 1 (iso) or 2 (joint-iso-itu-t).
/// - The second arc is at most 39 under arcs 0 and 1, and at most 175
///   under arc 2.
///
/// # Example
///
/// ```
/// use asn1_core::Oid;
///
/// let oid: Oid = "1.3.6.1.4.1".parse().unwrap();
/// assert_eq!(oid.arcs(), &[1, 3, 6, 1, 4, 1]);
/// assert_eq!(oid.to_string(), "1.3.6.1.4.1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Oid {
    arcs: Vec<u64>,
}

impl Oid {
    /// Create an object identifier from its arcs
    ///
    /// # Errors
    ///
    /// Returns `Asn1Error::Value` if the arcs violate the structural rules
    /// of the registration tree.
    pub fn new(arcs: Vec<u64>) -> Asn1Result<Self> {
        if arcs.len() < 2 {
            return Err(Asn1Error::Value {
                type_name: "OBJECT IDENTIFIER",
                detail: "fewer than two arcs",
            });
        }
        match arcs[0] {
            0 | 1 => {
                if arcs[1] > 39 {
                    return Err(Asn1Error::Value {
                        type_name: "OBJECT IDENTIFIER",
                        detail: "second arc exceeds 39 under itu-t/iso",
                    });
                }
            }
            2 => {
                if arcs[1] > 175 {
                    return Err(Asn1Error::Value {
                        type_name: "OBJECT IDENTIFIER",
                        detail: "second arc exceeds 175 under joint-iso-itu-t",
                    });
                }
            }
            _ => {
                return Err(Asn1Error::Value {
                    type_name: "OBJECT IDENTIFIER",
                    detail: "first arc must be 0, 1 or 2",
                });
            }
        }
        Ok(Self { arcs })
    }

    /// The identifier assigned to the Basic Encoding Rules themselves,
    /// `{joint-iso-itu-t asn1(1) basic-encoding(1)}` = 2.1.1
    pub fn basic_encoding_rules() -> Self {
        Self { arcs: vec![2, 1, 1] }
    }

    /// Get the arcs
    pub fn arcs(&self) -> &[u64] {
        &self.arcs
    }

    /// Consume the identifier, returning the arcs
    pub fn into_arcs(self) -> Vec<u64> {
        self.arcs
    }

    /// Number of arcs
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Always false: a valid identifier has at least two arcs
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arc) in self.arcs.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{arc}")?;
        }
        Ok(())
    }
}

impl FromStr for Oid {
    type Err = Asn1Error;

    /// Parse the dotted-decimal form, for example `"2.1.1"`
    fn from_str(s: &str) -> Asn1Result<Self> {
        if !dotted_form().is_match(s) {
            return Err(Asn1Error::Value {
                type_name: "OBJECT IDENTIFIER",
                detail: "malformed dotted-decimal form",
            });
        }
        let mut arcs = Vec::new();
        for part in s.split('.') {
            let arc = part.parse::<u64>().map_err(|_| Asn1Error::Value {
                type_name: "OBJECT IDENTIFIER",
                detail: "arc does not fit in a machine word",
            })?;
            arcs.push(arc);
        }
        Self::new(arcs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_valid_roots() {
        assert!(Oid::new(vec![0, 39, 7]).is_ok());
        assert!(Oid::new(vec![1, 3, 6, 1]).is_ok());
        assert!(Oid::new(vec![2, 175]).is_ok());
    }

    #[test]
    fn test_new_rejects_invalid_roots() {
        assert!(Oid::new(vec![3, 1]).is_err());
        assert!(Oid::new(vec![0, 40]).is_err());
        assert!(Oid::new(vec![1, 40]).is_err());
        assert!(Oid::new(vec![2, 176]).is_err());
        assert!(Oid::new(vec![1]).is_err());
        assert!(Oid::new(vec![]).is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let oid = Oid::new(vec![1, 3, 6, 1, 4, 1, 311]).unwrap();
        assert_eq!(oid.to_string(), "1.3.6.1.4.1.311");
        assert_eq!(oid.to_string().parse::<Oid>().unwrap(), oid);
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!("".parse::<Oid>().is_err());
        assert!("1".parse::<Oid>().is_err());
        assert!("1..3".parse::<Oid>().is_err());
        assert!("1.3.".parse::<Oid>().is_err());
        assert!("1.a.3".parse::<Oid>().is_err());
        assert!("-1.3".parse::<Oid>().is_err());
    }

    #[test]
    fn test_ber_identifier() {
        assert_eq!(Oid::basic_encoding_rules().to_string(), "2.1.1");
    }
}
