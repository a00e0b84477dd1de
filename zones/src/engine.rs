use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::consts::DEFAULT_ZONES_FILE;
use crate::doc::{Zone, ZoneStore};
use crate::hit::hit_test;
use crate::input::{Button, Gesture, InputEvent, Key, Mode, SessionState};
use crate::normalize::{ScreenPoint, ScreenRect, Size, rect_from_corners, to_normalized};
use crate::persist::{self, PersistError, SkippedRecord};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// What an input event did, reported back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ModeChanged(Mode),
    GestureStarted { start: ScreenPoint },
    GestureCancelled,
    ZoneCreated { index: usize, zone: Zone },
    ZoneSelected { index: usize },
    SelectionCleared,
    ZoneDeleted { index: usize, zone: Zone },
    ScoreToggled { index: usize, score: i32 },
    /// A zone was hit in play and removed; `total` is the running score after it.
    ZoneConsumed { index: usize, zone: Zone, total: i64 },
    Saved { path: PathBuf, count: usize },
    SaveFailed { message: String },
    /// The window changed size; the host must refit the background and call
    /// [`EngineCore::set_reference_size`].
    Resized(Size),
    Quit,
}

/// Mode-independent intent derived from a raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Click(ScreenPoint),
    Cancel,
    Delete,
    ToggleScore,
    Save,
}

impl Command {
    fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Escape => Some(Self::Cancel),
            Key::Delete => Some(Self::Delete),
            Key::Space => Some(Self::ToggleScore),
            Key::S => Some(Self::Save),
            Key::Num1 | Key::Num2 | Key::Num3 => None,
        }
    }
}

/// Core engine state: the zone store, the session, and the reference extent.
///
/// Owned by the single frame-loop thread. Events mutate it through
/// [`EngineCore::handle`]; rendering only reads it.
pub struct EngineCore {
    store: ZoneStore,
    session: SessionState,
    reference: Size,
    zones_path: PathBuf,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(DEFAULT_ZONES_FILE)
    }
}

impl EngineCore {
    /// An engine with an empty store that saves to `zones_path`.
    #[must_use]
    pub fn new(zones_path: impl Into<PathBuf>) -> Self {
        Self {
            store: ZoneStore::new(),
            session: SessionState::new(),
            reference: Size::default(),
            zones_path: zones_path.into(),
        }
    }

    /// Start from an existing store instead of an empty one.
    #[must_use]
    pub fn with_store(mut self, store: ZoneStore) -> Self {
        self.store = store;
        self
    }

    // --- Data inputs ---

    /// Replace the store with the document at the configured path.
    ///
    /// A missing file leaves an empty store. Returns the records that were
    /// skipped as malformed.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the file exists but cannot be read, or is
    /// not a JSON array.
    pub fn load_zones(&mut self) -> Result<Vec<SkippedRecord>, PersistError> {
        match persist::load(&self.zones_path) {
            Ok(decoded) => {
                info!(
                    path = %self.zones_path.display(),
                    count = decoded.store.len(),
                    skipped = decoded.skipped.len(),
                    "loaded zones"
                );
                self.store = decoded.store;
                self.session.clear_transients();
                Ok(decoded.skipped)
            }
            Err(e) if e.is_not_found() => {
                info!(path = %self.zones_path.display(), "no zones file yet; starting empty");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Update the reference extent (the fitted background size).
    pub fn set_reference_size(&mut self, size: Size) {
        self.reference = size;
    }

    // --- Input events ---

    /// Apply one input event.
    pub fn handle(&mut self, event: InputEvent) -> Vec<Action> {
        match event {
            InputEvent::Quit => vec![Action::Quit],
            InputEvent::Resized(size) => vec![Action::Resized(size)],
            InputEvent::KeyDown(key) => self.on_key_down(key),
            InputEvent::PointerDown { at, button } => self.on_pointer_down(at, button),
            InputEvent::PointerMoved(at) => {
                self.on_pointer_move(at);
                Vec::new()
            }
        }
    }

    /// Mode keys switch mode from anywhere; other keys go to the active mode.
    pub fn on_key_down(&mut self, key: Key) -> Vec<Action> {
        if let Some(mode) = key.mode() {
            return self.enter_mode(mode);
        }
        match Command::from_key(key) {
            Some(command) => self.dispatch(command),
            None => Vec::new(),
        }
    }

    /// Only the primary button acts; it also updates the pointer position.
    pub fn on_pointer_down(&mut self, at: ScreenPoint, button: Button) -> Vec<Action> {
        self.session.pointer = Some(at);
        if button != Button::Primary {
            return Vec::new();
        }
        self.dispatch(Command::Click(at))
    }

    pub fn on_pointer_move(&mut self, at: ScreenPoint) {
        self.session.pointer = Some(at);
    }

    // --- Transitions ---

    fn enter_mode(&mut self, mode: Mode) -> Vec<Action> {
        self.session.enter_mode(mode);
        debug!(%mode, "mode changed");
        vec![Action::ModeChanged(mode)]
    }

    fn dispatch(&mut self, command: Command) -> Vec<Action> {
        match self.session.mode {
            Mode::EditorCreate => self.create_mode(command),
            Mode::EditorSelect => self.select_mode(command),
            Mode::Play => self.play_mode(command),
        }
    }

    fn create_mode(&mut self, command: Command) -> Vec<Action> {
        match command {
            Command::Click(at) => match self.session.gesture {
                Gesture::Idle => {
                    self.session.gesture = Gesture::Anchored { start: at };
                    vec![Action::GestureStarted { start: at }]
                }
                Gesture::Anchored { start } => {
                    self.session.gesture = Gesture::Idle;
                    self.complete_gesture(start, at)
                }
            },
            Command::Cancel if self.session.gesture.is_active() => {
                self.session.gesture = Gesture::Idle;
                vec![Action::GestureCancelled]
            }
            _ => Vec::new(),
        }
    }

    fn complete_gesture(&mut self, start: ScreenPoint, end: ScreenPoint) -> Vec<Action> {
        if self.reference.is_empty() {
            warn!(reference = ?self.reference, "no background extent; zone not created");
            return vec![Action::GestureCancelled];
        }
        let rect = to_normalized(rect_from_corners(start, end), self.reference);
        let zone = Zone::new(rect);
        let index = self.store.add(zone);
        debug!(index, ?rect, "zone created");
        vec![Action::ZoneCreated { index, zone }]
    }

    fn select_mode(&mut self, command: Command) -> Vec<Action> {
        match command {
            // A click that hits nothing keeps the previous selection.
            Command::Click(at) => match hit_test(at, &self.store, self.reference) {
                Some(index) => {
                    self.session.selected = Some(index);
                    vec![Action::ZoneSelected { index }]
                }
                None => Vec::new(),
            },
            Command::Cancel => match self.session.selected.take() {
                Some(_) => vec![Action::SelectionCleared],
                None => Vec::new(),
            },
            Command::Delete => {
                let Some(index) = self.take_selection() else {
                    return Vec::new();
                };
                match self.store.remove(index) {
                    Some(zone) => {
                        debug!(index, "zone deleted");
                        vec![Action::ZoneDeleted { index, zone }]
                    }
                    None => Vec::new(),
                }
            }
            Command::ToggleScore => {
                let Some(index) = self.take_selection() else {
                    return Vec::new();
                };
                match self.store.toggle_score_sign(index) {
                    Some(score) => {
                        debug!(index, score, "zone score toggled");
                        vec![Action::ScoreToggled { index, score }]
                    }
                    None => Vec::new(),
                }
            }
            Command::Save => self.save(),
        }
    }

    fn play_mode(&mut self, command: Command) -> Vec<Action> {
        let Command::Click(at) = command else {
            return Vec::new();
        };
        let Some(index) = hit_test(at, &self.store, self.reference) else {
            return Vec::new();
        };
        let Some(zone) = self.store.remove(index) else {
            return Vec::new();
        };
        self.session.score += i64::from(zone.score);
        let total = self.session.score;
        debug!(index, score = zone.score, total, "zone consumed");
        vec![Action::ZoneConsumed { index, zone, total }]
    }

    fn save(&mut self) -> Vec<Action> {
        match persist::save(&self.store, &self.zones_path) {
            Ok(()) => {
                let count = self.store.len();
                info!(path = %self.zones_path.display(), count, "zones saved");
                self.session.status = Some(format!("saved {count} zones"));
                vec![Action::Saved { path: self.zones_path.clone(), count }]
            }
            Err(e) => {
                error!(error = %e, "saving zones failed");
                let message = e.to_string();
                self.session.status = Some(format!("save failed: {message}"));
                vec![Action::SaveFailed { message }]
            }
        }
    }

    /// Clear the selection and return it if it still names a live zone.
    fn take_selection(&mut self) -> Option<usize> {
        let index = self.session.selected.take()?;
        (index < self.store.len()).then_some(index)
    }

    // --- Queries ---

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.session.mode
    }

    /// Running play score.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.session.score
    }

    /// The selected zone index, if it still names a live zone.
    #[must_use]
    pub fn selection(&self) -> Option<usize> {
        self.session.selected.filter(|&index| index < self.store.len())
    }

    #[must_use]
    pub fn zones(&self) -> &ZoneStore {
        &self.store
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    #[must_use]
    pub fn reference_size(&self) -> Size {
        self.reference
    }

    /// Screen rectangle from the gesture start to the pointer, while a create
    /// gesture is in progress.
    #[must_use]
    pub fn gesture_preview(&self) -> Option<ScreenRect> {
        match (self.session.gesture, self.session.pointer) {
            (Gesture::Anchored { start }, Some(pointer)) => Some(rect_from_corners(start, pointer)),
            _ => None,
        }
    }
}
