//! Remote completion clients.

pub mod gemini;
