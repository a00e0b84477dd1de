//! Input model: modes, keys, pointer buttons, events, and session state.
//!
//! `InputEvent` is what the host window layer delivers each frame. `Mode` is
//! the flat editor/play state the engine dispatches on. `SessionState` holds
//! everything that lives between events: the active mode, the two-click create
//! gesture, the current selection, the running play score, and the last
//! pointer position (for drawing the gesture preview).

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;

use crate::normalize::{ScreenPoint, Size};

/// Which interaction mode is active. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Two-click rectangle drawing (default).
    #[default]
    EditorCreate,
    /// Select zones to delete, toggle, or save.
    EditorSelect,
    /// Click zones to collect their score.
    Play,
}

impl Mode {
    /// Whether this is one of the editor modes.
    #[must_use]
    pub fn is_editor(self) -> bool {
        matches!(self, Self::EditorCreate | Self::EditorSelect)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::EditorCreate => "editor: create",
            Self::EditorSelect => "editor: select",
            Self::Play => "play",
        };
        f.write_str(label)
    }
}

/// Keys the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// `1`: switch to [`Mode::EditorCreate`].
    Num1,
    /// `2`: switch to [`Mode::EditorSelect`].
    Num2,
    /// `3`: switch to [`Mode::Play`].
    Num3,
    Escape,
    Delete,
    Space,
    /// `S`: save the zones document.
    S,
}

impl Key {
    /// The mode this key selects, if it is a mode key.
    #[must_use]
    pub fn mode(self) -> Option<Mode> {
        match self {
            Self::Num1 => Some(Mode::EditorCreate),
            Self::Num2 => Some(Mode::EditorSelect),
            Self::Num3 => Some(Mode::Play),
            _ => None,
        }
    }
}

/// Pointer button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button.
    Primary,
    Middle,
    Secondary,
}

/// A discrete event from the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The window was closed.
    Quit,
    /// The window changed size.
    Resized(Size),
    KeyDown(Key),
    PointerDown { at: ScreenPoint, button: Button },
    /// The pointer is now at this position.
    PointerMoved(ScreenPoint),
}

/// The two-click create gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gesture {
    /// No first click recorded.
    #[default]
    Idle,
    /// First corner recorded; the next primary click completes the zone.
    Anchored {
        /// Screen-space position of the first click.
        start: ScreenPoint,
    },
}

impl Gesture {
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Anchored { .. })
    }
}

/// State that lives between input events.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Active interaction mode.
    pub mode: Mode,
    /// In-progress create gesture. Only ever active in [`Mode::EditorCreate`].
    pub gesture: Gesture,
    /// Index of the selected zone. Only ever set in [`Mode::EditorSelect`].
    pub selected: Option<usize>,
    /// Points collected in play. Starts at zero, never clamped.
    pub score: i64,
    /// Last reported pointer position.
    pub pointer: Option<ScreenPoint>,
    /// One-line message for the HUD (e.g. a failed save). Cleared on mode change.
    pub status: Option<String>,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to `mode`, dropping the gesture, the selection, and the status line.
    ///
    /// Applies even when `mode` is already active. The score is kept.
    pub fn enter_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.status = None;
        self.clear_transients();
    }

    /// Drop the in-progress gesture and the selection.
    pub fn clear_transients(&mut self) {
        self.gesture = Gesture::Idle;
        self.selected = None;
    }
}
