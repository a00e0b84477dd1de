//! minifb window: input polling and a pixel-buffer [`Renderer`].
//!
//! minifb has no font rasterizer, so HUD text collected during a frame is
//! shown in the window title when the frame is presented; text anchors and
//! colors are not used.

use minifb::{KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use tracing::debug;
use zones::input::{Button, InputEvent, Key};
use zones::normalize::{ScreenPoint, ScreenRect, Size};
use zones::render::{Color, Renderer, TextAnchor};

use crate::background::Background;
use crate::config::AppConfig;

const TITLE: &str = "zonepick";

pub struct Frontend {
    window: Window,
    buffer: Vec<u32>,
    width: usize,
    height: usize,
    background: Background,
    hud: Vec<String>,
    buttons_down: [bool; 3],
}

const BUTTONS: [(MouseButton, Button); 3] = [
    (MouseButton::Left, Button::Primary),
    (MouseButton::Middle, Button::Middle),
    (MouseButton::Right, Button::Secondary),
];

impl Frontend {
    /// Open a resizable window paced to the configured frame rate.
    pub fn open(config: &AppConfig, background: Background) -> Result<Self, minifb::Error> {
        let options = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(TITLE, config.window_width, config.window_height, options)?;
        window.set_target_fps(config.target_fps);

        let (width, height) = window.get_size();
        let mut frontend = Self {
            window,
            buffer: vec![0; width * height],
            width,
            height,
            background,
            hud: Vec::new(),
            buttons_down: [false; 3],
        };
        frontend.refit();
        Ok(frontend)
    }

    /// Fitted background extent, the engine's reference size.
    #[must_use]
    pub fn reference_size(&self) -> Size {
        self.background.size()
    }

    /// Resize the pixel buffer and refit the background to the window.
    pub fn refit(&mut self) {
        let (width, height) = self.window.get_size();
        self.width = width;
        self.height = height;
        self.buffer.resize(width * height, 0);
        self.background.fit(self.window_size());
        debug!(width, height, reference = ?self.background.size(), "background refit");
    }

    /// Translate this frame's window state into discrete input events.
    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if !self.window.is_open() {
            events.push(InputEvent::Quit);
            return events;
        }

        let (width, height) = self.window.get_size();
        if (width, height) != (self.width, self.height) {
            events.push(InputEvent::Resized(to_size(width, height)));
        }

        events.extend(
            self.window
                .get_keys_pressed(KeyRepeat::No)
                .into_iter()
                .filter_map(map_key)
                .map(InputEvent::KeyDown),
        );

        let pointer = self.window.get_mouse_pos(MouseMode::Discard).map(to_point);
        if let Some(at) = pointer {
            events.push(InputEvent::PointerMoved(at));
        }

        // minifb reports held state; a press is the frame it goes down.
        for ((mouse, button), was_down) in BUTTONS.into_iter().zip(&mut self.buttons_down) {
            let down = self.window.get_mouse_down(mouse);
            if down && !*was_down {
                if let Some(at) = pointer {
                    events.push(InputEvent::PointerDown { at, button });
                }
            }
            *was_down = down;
        }

        events
    }

    /// Flip the buffer to the window and show the HUD in the title.
    pub fn present(&mut self) -> Result<(), minifb::Error> {
        if !self.hud.is_empty() {
            let title = format!("{TITLE} | {}", self.hud.join(" | "));
            self.window.set_title(&title);
            self.hud.clear();
        }
        self.window.update_with_buffer(&self.buffer, self.width, self.height)
    }
}

impl Renderer for Frontend {
    fn window_size(&self) -> Size {
        to_size(self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.buffer.fill(color.to_u32());
    }

    fn draw_background(&mut self) {
        self.background.blit(&mut self.buffer, self.width);
    }

    fn fill_rect(&mut self, rect: ScreenRect, color: Color) {
        let clip = |v: i32, max: usize| usize::try_from(v.max(0)).unwrap_or(0).min(max);
        let (x0, x1) = (clip(rect.left, self.width), clip(rect.right(), self.width));
        let (y0, y1) = (clip(rect.top, self.height), clip(rect.bottom(), self.height));
        let pixel = color.to_u32();
        for y in y0..y1 {
            let row = y * self.width;
            self.buffer[row + x0..row + x1].fill(pixel);
        }
    }

    fn draw_text(&mut self, text: &str, _anchor: TextAnchor, _color: Color) {
        self.hud.push(text.to_owned());
    }
}

fn map_key(key: minifb::Key) -> Option<Key> {
    match key {
        minifb::Key::Key1 | minifb::Key::NumPad1 => Some(Key::Num1),
        minifb::Key::Key2 | minifb::Key::NumPad2 => Some(Key::Num2),
        minifb::Key::Key3 | minifb::Key::NumPad3 => Some(Key::Num3),
        minifb::Key::Escape => Some(Key::Escape),
        minifb::Key::Delete => Some(Key::Delete),
        minifb::Key::Space => Some(Key::Space),
        minifb::Key::S => Some(Key::S),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_point((x, y): (f32, f32)) -> ScreenPoint {
    ScreenPoint::new(x as i32, y as i32)
}

fn to_size(width: usize, height: usize) -> Size {
    Size::new(i32::try_from(width).unwrap_or(i32::MAX), i32::try_from(height).unwrap_or(i32::MAX))
}
