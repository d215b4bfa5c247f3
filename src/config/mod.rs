//! Static configuration
//!
//! Loaded once at startup and passed explicitly to the components that need it.

mod structs;

pub use structs::*;
