//! Source Resolution
//!
//! Canonicalizes the `sources` of a map and finds the reverse mapping list
//! for a source given by URL or by local file.

pub mod src;


pub use src::*;
