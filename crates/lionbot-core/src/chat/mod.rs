//! One chat round: building the user turn, calling the remote model, and
//! mapping the outcome to a reply.

pub mod parts;
pub mod reply;
pub mod service;
