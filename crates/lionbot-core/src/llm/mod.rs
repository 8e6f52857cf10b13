//! Remote completion port.
//!
//! - `CompletionClient`: RPITIT trait for the hosted model backend

pub mod client;
