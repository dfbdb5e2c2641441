//! Interactive stepping through correspondences.
//!
//! [`ViewerState`] is the cursor state machine, [`FrameRenderer`] turns a
//! model and a cursor into pixels, and [`InteractiveViewer`] runs the loop
//! against any frontend implementing [`DisplaySurface`] and [`InputSource`].
//! [`WindowFrontend`] is the `minifb` implementation used by the binary.

pub mod frontend;
pub mod render;
pub mod session;
pub mod state;
pub mod window;

pub use frontend::*;
pub use render::*;
pub use session::*;
pub use state::*;
pub use window::WindowFrontend;
