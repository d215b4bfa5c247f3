//! Application lifecycle and run modes

pub mod lifetime;
pub mod modes;
