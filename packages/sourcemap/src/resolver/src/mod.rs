pub mod canonical_url;
pub mod source_resolver;

pub use canonical_url::*;
pub use source_resolver::*;
