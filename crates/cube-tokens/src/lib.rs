//! Design-token ingestion for cube-css.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! This crate provides:
//! - The JSON token file format and name slugification
//! - Fluid `clamp()` value generation between two viewport widths
//! - Loading a directory of token files into a [`cube_css::ThemeRegistry`]

mod error;
mod file;
mod fluid;
mod loader;

pub use error::TokenError;
pub use file::{ItemValue, TokenFile, TokenItem, slugify, tokens_to_group};
pub use fluid::{Viewports, clamp_generator};
pub use loader::{GroupSource, TokenSources, load_registry};
