//! Process lifecycle.
//!
//! # Design Decisions
//! - Shutdown is a broadcast so the server and any background task observe it
//! - Ctrl+C is translated into the same broadcast

pub mod shutdown;

pub use shutdown::Shutdown;
