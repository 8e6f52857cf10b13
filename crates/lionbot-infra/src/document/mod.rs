//! Binary office document readers.

pub mod office;

pub use office::OfficeDocumentParser;
