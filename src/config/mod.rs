//! Configuration module for gifcrop
//!
//! Provides types, discovery and parsing for `gifcrop.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
