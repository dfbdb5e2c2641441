use std::time::{Duration, Instant};
use tracing::{debug, info, info_span};

use super::frontend::{DisplaySurface, InputSource};
use super::render::FrameRenderer;
use super::state::{InputEvent, Transition, ViewerState};
use crate::config::{DrawingConfig, ViewerConfig};
use crate::logging::{self, FrameStats};
use crate::model::MatchingModel;
use crate::Result;

/// Steps through the correspondences of a model one at a time.
///
/// Interactive sessions loop on input until a quit event; non-interactive
/// sessions show a single frame at native size for a fixed time, ending early
/// on quit and ignoring every other event, fullscreen toggles included.
pub struct InteractiveViewer {
    renderer: FrameRenderer,
    settings: ViewerConfig,
    stats: FrameStats,
}

impl InteractiveViewer {
    pub fn new(style: &DrawingConfig, settings: &ViewerConfig) -> Result<Self> {
        Ok(Self {
            renderer: FrameRenderer::new(style)?.with_cursor_convention(settings.cursor_convention),
            settings: settings.clone(),
            stats: FrameStats::new(),
        })
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Cursor state a session over `model` starts from.
    pub fn initial_state(&self, model: &MatchingModel) -> ViewerState {
        let state = ViewerState::new(
            self.settings.cursor_convention,
            model.number_of_correspondences(),
            self.settings.interactive,
        );
        match (self.settings.initial_cursor, self.settings.interactive) {
            (Some(cursor), _) => state.starting_at(cursor),
            (None, true) => state,
            (None, false) => {
                let last = state.upper_bound();
                state.starting_at(last)
            }
        }
    }

    /// Run a session and return the final cursor state.
    pub fn run<F>(&mut self, model: &MatchingModel, frontend: &mut F) -> Result<ViewerState>
    where
        F: DisplaySurface + InputSource,
    {
        let session_id = logging::new_session_id();
        let span = info_span!(
            "viewer_session",
            session_id = %session_id,
            correspondences = model.number_of_correspondences(),
            interactive = self.settings.interactive
        );
        let _enter = span.enter();

        let mut state = self.initial_state(model);
        let result = if state.is_interactive() {
            self.run_interactive(model, frontend, &mut state)
        } else {
            self.run_once(model, frontend, &mut state)
        };

        self.stats.log_summary();
        logging::clear_session_id();
        result.map(|_| state)
    }

    fn run_interactive<F>(
        &mut self,
        model: &MatchingModel,
        frontend: &mut F,
        state: &mut ViewerState,
    ) -> Result<()>
    where
        F: DisplaySurface + InputSource,
    {
        self.redraw(model, frontend, state)?;

        let mut running = true;
        while running {
            let Some(event) = frontend.next_event(None)? else {
                continue;
            };

            match state.apply(event) {
                Transition::Quit => {
                    info!(cursor = state.cursor(), "Quit requested");
                    running = false;
                }
                Transition::ToggleFullscreen => frontend.toggle_fullscreen()?,
                Transition::Continue => {
                    if state.needs_redraw() {
                        self.redraw(model, frontend, state)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn run_once<F>(
        &mut self,
        model: &MatchingModel,
        frontend: &mut F,
        state: &mut ViewerState,
    ) -> Result<()>
    where
        F: DisplaySurface + InputSource,
    {
        self.redraw(model, frontend, state)?;

        let deadline = Instant::now() + Duration::from_millis(self.settings.non_interactive_timeout_ms);
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match frontend.next_event(Some(remaining))? {
                Some(InputEvent::Quit) | None => break,
                // cursor and fullscreen input have no effect on a single frame
                Some(_) => {}
            }
        }

        Ok(())
    }

    fn redraw<F>(&mut self, model: &MatchingModel, frontend: &mut F, state: &mut ViewerState) -> Result<()>
    where
        F: DisplaySurface,
    {
        let start = Instant::now();
        let frame = self.renderer.render(model, state.cursor())?;
        frontend.present(&frame.image, &frame.caption)?;
        state.mark_drawn();

        let elapsed = start.elapsed();
        self.stats.record(elapsed);
        debug!(
            cursor = state.cursor(),
            drawn = frame.drawn.len(),
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            caption = %frame.caption,
            "Frame redrawn"
        );
        Ok(())
    }
}
