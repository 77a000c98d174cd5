//! apps/examgen/src/term/mod.rs
//!
//! Terminal front end: one module per application phase plus the session
//! loop that binds them to the core state machine.

mod form;
mod results;
mod run;

pub use run::run;
