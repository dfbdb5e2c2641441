pub mod matching;
pub mod types;

pub use matching::*;
pub use types::*;
