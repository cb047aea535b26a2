#![deny(clippy::all)]

/**
 * Source Map Lookup CLI - Rust Implementation
 *
 * Command-line front end over the source map decoder
 */
pub use source_map_lookup as sourcemap;

pub mod commands;
pub mod config;

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
