//! Core types for ASN.1 encoding rules
//!
//! This crate provides the value types and the failure taxonomy shared by
//! the ASN.1 codec crates. It contains no wire-format logic of its own: the
//! encoding rules live in `asn1-ber`.

pub mod error;
pub mod datatypes;

pub use error::{Asn1Error, Asn1Result};
pub use datatypes::bit_string::BitString;
pub use datatypes::character_string::CharacterString;
pub use datatypes::embedded_pdv::EmbeddedPdv;
pub use datatypes::external::{External, ExternalEncoding};
pub use datatypes::identification::Identification;
pub use datatypes::oid::Oid;
