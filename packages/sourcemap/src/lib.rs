#![deny(clippy::all)]

/**
 * Source Map Lookup - Rust Implementation
 *
 * Decodes Source Map v3 documents and answers positional queries between
 * generated and original coordinates.
 */
pub mod decoder;
pub mod document;
pub mod file_system;
pub mod logging;
pub mod mapping;
pub mod resolver;
pub mod source_map;
pub mod vlq;

pub use decoder::{decode, DecodeError, SourceMapDecoder};
pub use document::{LineOffsets, TextDocument};
pub use mapping::{MappedSource, MappingEntry, MappingList, MappingOrder};
pub use resolver::{CanonicalUrl, SourceResolver};
pub use source_map::SourceMap;

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
