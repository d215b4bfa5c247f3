//! System-level modules
//!
//! Process-wide concerns that sit outside the store and key factory.

pub mod logging;
