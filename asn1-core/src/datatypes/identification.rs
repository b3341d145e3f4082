//! Identification CHOICE shared by the composite value types
//!
//! EXTERNAL, EmbeddedPDV and CharacterString all carry an `identification`
//! field describing how the embedded data value is encoded. On the wire the
//! CHOICE is encoded under AUTOMATIC TAGS, so each variant maps directly to
//! a context-specific tag number.

use crate::datatypes::oid::Oid;
use serde::{Deserialize, Serialize};

/// The identification CHOICE of the composite types
///
/// The wire tag of each variant equals its position in the CHOICE, 0-5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Identification {
    /// Abstract and transfer syntax object identifiers (tag 0)
    Syntaxes {
        /// Identifier of the abstract syntax
        abstract_syntax: Oid,
        /// Identifier of the transfer syntax
        transfer_syntax: Oid,
    },
    /// A single object identifier naming the syntax (tag 1)
    Syntax(Oid),
    /// Presentation context identifier negotiated out of band (tag 2)
    PresentationContextId(i64),
    /// Presentation context plus explicit transfer syntax (tag 3)
    ContextNegotiation {
        /// The negotiated presentation context identifier
        presentation_context_id: i64,
        /// Identifier of the transfer syntax
        transfer_syntax: Oid,
    },
    /// A transfer syntax identifier alone (tag 4)
    TransferSyntax(Oid),
    /// Fixed, mutually agreed encoding (tag 5)
    Fixed,
}

impl Identification {
    /// The context-specific tag number selecting this variant
    pub fn choice_tag(&self) -> u64 {
        match self {
            Identification::Syntaxes { .. } => 0,
            Identification::Syntax(_) => 1,
            Identification::PresentationContextId(_) => 2,
            Identification::ContextNegotiation { .. } => 3,
            Identification::TransferSyntax(_) => 4,
            Identification::Fixed => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_tags_match_wire_order() {
        let oid = Oid::new(vec![2, 1, 1]).unwrap();
        assert_eq!(
            Identification::Syntaxes {
                abstract_syntax: oid.clone(),
                transfer_syntax: oid.clone(),
            }
            .choice_tag(),
            0
        );
        assert_eq!(Identification::Syntax(oid.clone()).choice_tag(), 1);
        assert_eq!(Identification::PresentationContextId(9).choice_tag(), 2);
        assert_eq!(
            Identification::ContextNegotiation {
                presentation_context_id: 9,
                transfer_syntax: oid.clone(),
            }
            .choice_tag(),
            3
        );
        assert_eq!(Identification::TransferSyntax(oid).choice_tag(), 4);
        assert_eq!(Identification::Fixed.choice_tag(), 5);
    }
}
