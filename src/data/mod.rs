pub mod color;
pub mod loader;
pub mod synthetic;

pub use color::*;
pub use loader::*;
pub use synthetic::*;
