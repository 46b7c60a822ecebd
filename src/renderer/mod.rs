//! Display layer
//!
//! The game never draws; it asks a [`Display`] to create, move and remove
//! visual entities and mirrors the session into it through [`SceneSync`].
//! Backends:
//! - `HeadlessDisplay`: records every call (native demo, tests)
//! - `DomDisplay`: positioned `<div>`s in the page (wasm32)

use serde::Serialize;
use thiserror::Error;

use crate::sim::{CloudSize, FlapVariant, GamePhase};

#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod headless;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use dom::DomDisplay;
pub use headless::HeadlessDisplay;
pub use scene::SceneSync;

/// Opaque reference to something the display created
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Handle(pub u32);

/// Kinds of visual entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    Player,
    PipeTop,
    PipeBottom,
    Cloud(CloudSize),
    Puff(FlapVariant),
}

impl EntityKind {
    /// CSS-style class list for this kind
    pub fn class_name(&self) -> String {
        match self {
            EntityKind::Player => "frog".to_string(),
            EntityKind::PipeTop => "pipe pipe-top".to_string(),
            EntityKind::PipeBottom => "pipe pipe-bottom".to_string(),
            EntityKind::Cloud(size) => format!("cloud {}", size.as_str()),
            EntityKind::Puff(variant) => format!("fart-cloud {}", variant.as_str()),
        }
    }
}

/// Fixed sizing applied at creation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Style {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl Style {
    pub fn sized(width: f32, height: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }
}

/// Text overlay state; pushed only when it changes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub phase: GamePhase,
    pub score: u32,
    pub best: u32,
    /// FPS overlay line, when enabled
    pub diagnostics: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DisplayError {
    #[error("required element `{0}` is missing")]
    MissingElement(&'static str),
    #[error("unknown handle {0:?}")]
    UnknownHandle(Handle),
    #[error("display backend failed: {0}")]
    Backend(String),
}

/// Scene/display layer consumed by the game
pub trait Display {
    fn create_entity(&mut self, kind: EntityKind, style: &Style) -> Result<Handle, DisplayError>;

    /// Move an entity's top-left corner to `(x, y)`
    fn set_position(&mut self, handle: Handle, x: f32, y: f32);

    fn remove(&mut self, handle: Handle) -> Result<(), DisplayError>;

    /// Rendered height, if the backend can measure it. Queried once for the
    /// player and cached.
    fn query_height(&self, handle: Handle) -> Option<f32>;

    fn show_hud(&mut self, _hud: &Hud) {}
}
