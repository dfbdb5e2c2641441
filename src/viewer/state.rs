use serde::{Deserialize, Serialize};

/// Semantic input produced by a frontend's input adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Reveal one more correspondence.
    Advance,
    /// Hide the last revealed correspondence.
    Retreat,
    /// Accumulated wheel ticks, positive towards "advance".
    WheelDelta(i32),
    ToggleFullscreen,
    Quit,
}

/// Where the cursor may rest at the low end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorConvention {
    /// Cursor `-1` shows no correspondence at all.
    #[default]
    NothingRevealed,
    /// The first correspondence is always shown.
    FirstRevealed,
}

impl CursorConvention {
    pub fn lower_bound(&self) -> i64 {
        match self {
            CursorConvention::NothingRevealed => -1,
            CursorConvention::FirstRevealed => 0,
        }
    }
}

/// What the loop should do after an event has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Cursor input was applied; check [`ViewerState::needs_redraw`].
    Continue,
    ToggleFullscreen,
    Quit,
}

/// Cursor over the correspondence list plus the last drawn cursor value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerState {
    cursor: i64,
    previous: Option<i64>,
    lower: i64,
    upper: i64,
    interactive: bool,
}

impl ViewerState {
    /// Start at the convention's lower bound with nothing drawn yet.
    pub fn new(convention: CursorConvention, total: usize, interactive: bool) -> Self {
        let lower = convention.lower_bound();
        Self {
            cursor: lower,
            previous: None,
            lower,
            upper: total as i64 - 1,
            interactive,
        }
    }

    /// Move the starting cursor, clamped into range.
    pub fn starting_at(mut self, cursor: i64) -> Self {
        self.cursor = self.clamp(cursor);
        self
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn previous(&self) -> Option<i64> {
        self.previous
    }

    pub fn lower_bound(&self) -> i64 {
        self.lower
    }

    pub fn upper_bound(&self) -> i64 {
        self.upper
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn apply(&mut self, event: InputEvent) -> Transition {
        match event {
            InputEvent::Advance => self.step(1),
            InputEvent::Retreat => self.step(-1),
            InputEvent::WheelDelta(delta) if delta != 0 => self.step(delta as i64),
            InputEvent::WheelDelta(_) => {}
            InputEvent::ToggleFullscreen => return Transition::ToggleFullscreen,
            InputEvent::Quit => return Transition::Quit,
        }
        Transition::Continue
    }

    /// True when the cursor differs from the last drawn value (or nothing was drawn yet).
    pub fn needs_redraw(&self) -> bool {
        self.previous != Some(self.cursor)
    }

    pub fn mark_drawn(&mut self) {
        self.previous = Some(self.cursor);
    }

    fn step(&mut self, delta: i64) {
        self.cursor = self.clamp(self.cursor.saturating_add(delta));
    }

    // the lower bound wins when the list is too short to reach it
    fn clamp(&self, cursor: i64) -> i64 {
        cursor.min(self.upper).max(self.lower)
    }
}
