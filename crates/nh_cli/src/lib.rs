//! Project-level operations behind the `neha` binary.

pub mod check;
pub mod config;
pub mod project;
