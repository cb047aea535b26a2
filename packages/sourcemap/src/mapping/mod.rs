//! Mapping Records
//!
//! Decoded mapping entries and the two orderings they are indexed by.

pub mod src;


pub use src::*;
