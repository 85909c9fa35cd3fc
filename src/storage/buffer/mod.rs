pub mod error;
pub mod replacer;

pub use error::ReplacerError;
pub use replacer::{LRUKReplacer, LRUReplacer};
