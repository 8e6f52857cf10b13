//! Process-wide conversation history with a trailing-window eviction policy.

pub mod store;
