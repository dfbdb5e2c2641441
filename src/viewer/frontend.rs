use image::RgbImage;
use std::time::Duration;

use super::state::InputEvent;
use crate::Result;

/// Somewhere frames can be shown.
pub trait DisplaySurface {
    /// Show `frame`, replacing whatever was shown before.
    fn present(&mut self, frame: &RgbImage, caption: &str) -> Result<()>;

    /// Switch between the native frame size and a screen-filling one.
    fn toggle_fullscreen(&mut self) -> Result<()>;
}

/// Source of semantic input events.
pub trait InputSource {
    /// Block until the next event arrives.
    ///
    /// With a timeout, returns `Ok(None)` once it elapses without input.
    fn next_event(&mut self, timeout: Option<Duration>) -> Result<Option<InputEvent>>;
}
