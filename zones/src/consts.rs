//! Shared constants for the zones crate.

use crate::render::Color;

// ── Normalized space ────────────────────────────────────────────

/// Side length of the virtual canvas zones are stored in.
pub const NORMALIZED_EXTENT: f64 = 10_000.0;

// ── Scoring ─────────────────────────────────────────────────────

/// Score assigned to a freshly drawn zone.
pub const DEFAULT_ZONE_SCORE: i32 = 1;

// ── Persistence ─────────────────────────────────────────────────

/// Zones document written by the save key when no other path is configured.
pub const DEFAULT_ZONES_FILE: &str = "level1_zones.json";

// ── Colors ──────────────────────────────────────────────────────

/// Fill behind the background image.
pub const BACKDROP: Color = Color::rgb(128, 0, 128);

/// Zone with a positive score.
pub const REWARD_FILL: Color = Color::rgb(0, 255, 0);

/// Zone with a zero or negative score.
pub const PENALTY_FILL: Color = Color::rgb(255, 0, 0);

/// Currently selected zone, regardless of score.
pub const SELECTED_FILL: Color = Color::rgb(120, 120, 120);

/// Rectangle of a create gesture that has not been completed yet.
pub const GESTURE_FILL: Color = Color::rgb(100, 0, 0);

/// Mode label, score and status text.
pub const HUD_TEXT: Color = Color::rgb(0, 255, 0);

// ── HUD layout ──────────────────────────────────────────────────

/// Vertical offset of the status line below the mode label, in pixels.
pub const STATUS_LINE_OFFSET_PX: i32 = 24;
