//! SEQUENCE and SET accessors
//!
//! At this layer the two types share one wire shape: a constructed element
//! whose content is the concatenation of its children. Ordering semantics
//! (SET is unordered, SEQUENCE is not) belong to schema-aware layers.

use asn1_core::Asn1Result;

use crate::element::{Element, MAX_NESTING_DEPTH};
use crate::tag::Construction;
use crate::value::{children_of, concat_children, expect_constructed};

impl Element {
    /// Read the content as a SEQUENCE of child elements
    ///
    /// # Errors
    ///
    /// `Construction` on a primitive element; any parse failure of a child,
    /// including `Truncation` when the content ends inside one.
    pub fn sequence(&self) -> Asn1Result<Vec<Element>> {
        expect_constructed(self, "SEQUENCE")?;
        children_of(self.content(), MAX_NESTING_DEPTH)
    }

    /// Store a SEQUENCE of child elements
    pub fn set_sequence(&mut self, children: &[Element]) {
        self.construction = Construction::Constructed;
        self.content = concat_children(children);
    }

    /// Read the content as a SET of child elements
    pub fn set(&self) -> Asn1Result<Vec<Element>> {
        expect_constructed(self, "SET")?;
        children_of(self.content(), MAX_NESTING_DEPTH)
    }

    /// Store a SET of child elements
    pub fn set_set(&mut self, children: &[Element]) {
        self.set_sequence(children);
    }
}
