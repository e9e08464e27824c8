//! Command implementations for the cube CLI
//!
//! Each command loads the project and delegates to cube-css and cube-tokens
//! for the actual work.

pub mod build;
pub mod check;
pub mod rules;
