//! apps/examgen/src/lib.rs
//!
//! Library surface of the terminal application. The binary in
//! `src/bin/examgen.rs` wires these pieces together.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod term;
