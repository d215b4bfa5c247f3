//! Shortkey - a small URL shortener
//!
//! Maps long URLs to short, collision-free keys and resolves them back,
//! persisting the mapping in a single embedded redb file.
//!
//! # Architecture
//! - `store`: transactional key-value store (one `urls` bucket, backups)
//! - `keygen`: pluggable key generators and the collision-retry `KeyFactory`
//! - `api`: HTTP services (shorten, redirect, backup, health)
//! - `cli`: command-line definition
//! - `config`: static configuration
//! - `runtime`: application lifecycle and execution modes
//! - `system`: logging
//! - `utils`: URL validation and encoding helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod keygen;
pub mod runtime;
pub mod store;
pub mod system;
pub mod utils;
