//! Zone editor and pick-the-zone game core.
//!
//! This crate owns everything about zones that does not depend on a window:
//! the resolution-independent coordinate space zones are stored in, the
//! ordered zone store, the interaction state machine that turns input events
//! into store mutations, scoring, and the persisted zones document. The host
//! binary is responsible only for polling the window, fitting the background
//! image, and handing events to [`engine::EngineCore`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Interaction state machine and play scoring ([`engine::EngineCore`]) |
//! | [`doc`] | Zone type and the ordered [`doc::ZoneStore`] |
//! | [`normalize`] | Screen ↔ normalized rectangle conversions |
//! | [`input`] | Input event types, modes, and [`input::SessionState`] |
//! | [`hit`] | First-match hit-testing against the store |
//! | [`persist`] | Persisted zones document codec and file I/O |
//! | [`render`] | Read-only frame description against a [`render::Renderer`] |
//! | [`consts`] | Shared constants (canvas extent, colors, default paths) |

pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod normalize;
pub mod persist;
pub mod render;
