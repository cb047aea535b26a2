//! Logging
//!
//! Minimal logger interface threaded through decoding and source resolution.

pub mod src;


pub use src::*;
