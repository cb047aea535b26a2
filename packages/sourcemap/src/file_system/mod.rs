//! File System Abstraction
//!
//! Path canonicalization and the local-filesystem probes used while
//! resolving source paths.

pub mod src;
pub mod testing;

#[cfg(test)]
mod test;

pub use src::*;
