pub mod entry;
pub mod list;

pub use entry::*;
pub use list::*;
