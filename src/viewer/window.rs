//! `minifb` window acting as display surface and input adapter.

use image::RgbImage;
use minifb::{Key, KeyRepeat, Scale, ScaleMode, Window, WindowOptions};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::frontend::{DisplaySurface, InputSource};
use super::state::InputEvent;
use crate::config::{KeyBindings, ViewerConfig};
use crate::Result;

/// Key names accepted in [`KeyBindings`].
pub fn parse_key(name: &str) -> Option<Key> {
    let key = match name.to_ascii_lowercase().as_str() {
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        "escape" | "esc" => Key::Escape,
        "space" => Key::Space,
        "enter" | "return" => Key::Enter,
        "tab" => Key::Tab,
        "backspace" => Key::Backspace,
        "pageup" => Key::PageUp,
        "pagedown" => Key::PageDown,
        "home" => Key::Home,
        "end" => Key::End,
        "a" => Key::A,
        "b" => Key::B,
        "c" => Key::C,
        "d" => Key::D,
        "e" => Key::E,
        "f" => Key::F,
        "g" => Key::G,
        "h" => Key::H,
        "i" => Key::I,
        "j" => Key::J,
        "k" => Key::K,
        "l" => Key::L,
        "m" => Key::M,
        "n" => Key::N,
        "o" => Key::O,
        "p" => Key::P,
        "q" => Key::Q,
        "r" => Key::R,
        "s" => Key::S,
        "t" => Key::T,
        "u" => Key::U,
        "v" => Key::V,
        "w" => Key::W,
        "x" => Key::X,
        "y" => Key::Y,
        "z" => Key::Z,
        "0" => Key::Key0,
        "1" => Key::Key1,
        "2" => Key::Key2,
        "3" => Key::Key3,
        "4" => Key::Key4,
        "5" => Key::Key5,
        "6" => Key::Key6,
        "7" => Key::Key7,
        "8" => Key::Key8,
        "9" => Key::Key9,
        "f11" => Key::F11,
        "f12" => Key::F12,
        _ => return None,
    };
    Some(key)
}

/// Key to event table built from [`KeyBindings`].
#[derive(Debug, Clone)]
pub struct KeyMap {
    entries: Vec<(Key, InputEvent)>,
}

impl KeyMap {
    pub fn from_bindings(bindings: &KeyBindings) -> Result<Self> {
        let mut entries = Vec::new();
        for (names, event) in [
            (&bindings.advance, InputEvent::Advance),
            (&bindings.retreat, InputEvent::Retreat),
            (&bindings.quit, InputEvent::Quit),
            (&bindings.fullscreen, InputEvent::ToggleFullscreen),
        ] {
            for name in names {
                let key = parse_key(name).ok_or_else(|| anyhow::anyhow!("Unknown key name '{}'", name))?;
                entries.push((key, event));
            }
        }
        Ok(Self { entries })
    }

    pub fn event_for(&self, key: Key) -> Option<InputEvent> {
        self.entries
            .iter()
            .find(|(bound, _)| *bound == key)
            .map(|(_, event)| *event)
    }
}

pub struct WindowFrontend {
    window: Window,
    title: String,
    keys: KeyMap,
    target_fps: usize,
    wheel_step: f32,
    buffer: Vec<u32>,
    size: (usize, usize),
    fullscreen: bool,
    closed: bool,
    wheel: f32,
    pending: VecDeque<InputEvent>,
}

impl WindowFrontend {
    /// Open a window sized for `width` x `height` frames.
    pub fn open(settings: &ViewerConfig, width: u32, height: u32) -> Result<Self> {
        let size = (width as usize, height as usize);
        let window = create_window(&settings.window_title, size, false, settings.target_fps)?;
        Ok(Self {
            window,
            title: settings.window_title.clone(),
            keys: KeyMap::from_bindings(&settings.keys)?,
            target_fps: settings.target_fps,
            wheel_step: settings.wheel_step,
            buffer: vec![0; size.0 * size.1],
            size,
            fullscreen: false,
            closed: false,
            wheel: 0.0,
            pending: VecDeque::new(),
        })
    }

    fn refresh(&mut self) -> Result<()> {
        self.window
            .update_with_buffer(&self.buffer, self.size.0, self.size.1)
            .map_err(|e| anyhow::anyhow!("Failed to update window: {}", e))
    }

    // one window update; queues whatever input it saw
    fn pump(&mut self) -> Result<()> {
        self.refresh()?;
        if !self.window.is_open() {
            self.closed = true;
            self.pending.push_back(InputEvent::Quit);
            return Ok(());
        }

        if let Some((_, dy)) = self.window.get_scroll_wheel() {
            self.wheel += dy / self.wheel_step;
        }
        let ticks = self.wheel.trunc();
        if ticks != 0.0 {
            self.wheel -= ticks;
            self.pending.push_back(InputEvent::WheelDelta(ticks as i32));
        }

        for key in self.window.get_keys_pressed(KeyRepeat::Yes) {
            if let Some(event) = self.keys.event_for(key) {
                self.pending.push_back(event);
            }
        }
        Ok(())
    }
}

impl DisplaySurface for WindowFrontend {
    fn present(&mut self, frame: &RgbImage, caption: &str) -> Result<()> {
        self.size = (frame.width() as usize, frame.height() as usize);
        self.buffer = frame
            .pixels()
            .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
            .collect();
        self.window.set_title(&format!("{} - {}", self.title, caption));
        self.refresh()
    }

    fn toggle_fullscreen(&mut self) -> Result<()> {
        self.fullscreen = !self.fullscreen;
        self.window = create_window(&self.title, self.size, self.fullscreen, self.target_fps)?;
        tracing::debug!(fullscreen = self.fullscreen, "Window recreated");
        self.refresh()
    }
}

impl InputSource for WindowFrontend {
    fn next_event(&mut self, timeout: Option<Duration>) -> Result<Option<InputEvent>> {
        let deadline = timeout.map(|t| Instant::now() + t);
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(Some(event));
            }
            if self.closed {
                return Ok(Some(InputEvent::Quit));
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                return Ok(None);
            }
            self.pump()?;
        }
    }
}

fn create_window(title: &str, size: (usize, usize), fullscreen: bool, fps: usize) -> Result<Window> {
    let mut window = Window::new(
        title,
        size.0,
        size.1,
        WindowOptions {
            resize: true,
            scale: if fullscreen { Scale::FitScreen } else { Scale::X1 },
            scale_mode: ScaleMode::AspectRatioStretch,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| anyhow::anyhow!("Failed to open window: {}", e))?;
    window.set_target_fps(fps);
    Ok(window)
}
