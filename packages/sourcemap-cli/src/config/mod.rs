pub mod smap;


pub use smap::*;
