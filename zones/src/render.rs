//! Rendering: describes one frame against an abstract [`Renderer`].
//!
//! This module never touches pixels. The host implements [`Renderer`] over
//! whatever window it owns and calls [`draw_scene`] once per frame, after all
//! input for the frame has been handled. `draw_scene` takes the engine by
//! shared reference and does not mutate any application state.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::consts::{
    BACKDROP, GESTURE_FILL, HUD_TEXT, PENALTY_FILL, REWARD_FILL, SELECTED_FILL, STATUS_LINE_OFFSET_PX,
};
use crate::doc::Zone;
use crate::engine::EngineCore;
use crate::normalize::{ScreenPoint, ScreenRect, Size, to_screen};

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packed `0x00RRGGBB`.
    #[must_use]
    pub fn to_u32(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }
}

/// Where a line of text is pinned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// The text's top-left corner sits at the point.
    TopLeft(ScreenPoint),
    /// The text's top-right corner sits at the point.
    TopRight(ScreenPoint),
}

/// Drawing surface provided by the host window.
pub trait Renderer {
    /// Current window size in pixels.
    fn window_size(&self) -> Size;
    /// Fill the whole window.
    fn clear(&mut self, color: Color);
    /// Blit the fitted background image at the window origin.
    fn draw_background(&mut self);
    fn fill_rect(&mut self, rect: ScreenRect, color: Color);
    /// Draw one line of HUD text.
    ///
    /// `anchor` and `color` are advisory: a host without a font rasterizer
    /// may show the text elsewhere, such as in the window title.
    fn draw_text(&mut self, text: &str, anchor: TextAnchor, color: Color);
}

/// Paint the full frame: backdrop, background, zones, gesture, HUD.
///
/// Zones are hidden in play so the player has to find them.
pub fn draw_scene<R: Renderer>(renderer: &mut R, core: &EngineCore) {
    renderer.clear(BACKDROP);
    renderer.draw_background();

    if core.mode().is_editor() {
        let selected = core.selection();
        let reference = core.reference_size();
        for (index, zone) in core.zones().iter().enumerate() {
            let color = zone_color(zone, selected == Some(index));
            renderer.fill_rect(to_screen(zone.rect, reference), color);
        }
    }

    if let Some(rect) = core.gesture_preview() {
        renderer.fill_rect(rect, GESTURE_FILL);
    }

    draw_hud(renderer, core);
}

fn draw_hud<R: Renderer>(renderer: &mut R, core: &EngineCore) {
    let width = renderer.window_size().width;
    renderer.draw_text(&core.mode().to_string(), TextAnchor::TopLeft(ScreenPoint::new(0, 0)), HUD_TEXT);
    renderer.draw_text(&core.score().to_string(), TextAnchor::TopRight(ScreenPoint::new(width, 0)), HUD_TEXT);
    if let Some(status) = &core.session().status {
        renderer.draw_text(status, TextAnchor::TopLeft(ScreenPoint::new(0, STATUS_LINE_OFFSET_PX)), HUD_TEXT);
    }
}

/// Fill color for a zone: selection wins, then score sign.
#[must_use]
pub fn zone_color(zone: &Zone, selected: bool) -> Color {
    if selected {
        SELECTED_FILL
    } else if zone.is_reward() {
        REWARD_FILL
    } else {
        PENALTY_FILL
    }
}
