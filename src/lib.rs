pub mod compositing;
pub mod config;
pub mod data;
pub mod drawing;
pub mod logging;
pub mod model;
pub mod viewer;

pub use compositing::*;
pub use data::*;
pub use drawing::*;
pub use model::*;

pub type Result<T> = anyhow::Result<T>;
