//! Attachment handling: normalizing legacy request shapes and extracting
//! content from office documents.

pub mod extract;
pub mod normalize;
