//! Source Map Decoding
//!
//! JSON envelope, `mappings` segments and assembly of the queryable
//! [`SourceMap`](crate::source_map::SourceMap).

pub mod src;


pub use src::*;
