pub mod local_file_system;
pub mod types;
pub mod util;

pub use local_file_system::*;
pub use types::*;
pub use util::*;
