//! Value types carried by ASN.1 elements

pub mod bit_string;
pub mod character_string;
pub mod embedded_pdv;
pub mod external;
pub mod identification;
pub mod oid;
