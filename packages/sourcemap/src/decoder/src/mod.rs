pub mod decoder;
pub mod errors;
pub mod mappings;
pub mod raw_source_map;

pub use decoder::*;
pub use errors::*;
pub use mappings::*;
pub use raw_source_map::*;
