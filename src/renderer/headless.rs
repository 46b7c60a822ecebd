//! Display that keeps everything in memory
//!
//! Used by the native demo and by tests; counts removals so callers can
//! check that every handle is released exactly once.

use std::collections::BTreeMap;

use super::{Display, DisplayError, EntityKind, Handle, Hud, Style};

/// One recorded entity
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessEntity {
    pub kind: EntityKind,
    pub style: Style,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone)]
pub struct HeadlessDisplay {
    entities: BTreeMap<Handle, HeadlessEntity>,
    next_handle: u32,
    player_height: Option<f32>,
    refuse_player: bool,
    created: usize,
    removed: usize,
    failed_removals: usize,
    hud: Option<Hud>,
    hud_updates: usize,
}

impl Default for HeadlessDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
            next_handle: 1,
            player_height: None,
            refuse_player: false,
            created: 0,
            removed: 0,
            failed_removals: 0,
            hud: None,
            hud_updates: 0,
        }
    }

    /// Report this height for the player entity
    pub fn with_player_height(mut self, height: f32) -> Self {
        self.player_height = Some(height);
        self
    }

    /// Simulate a page with no player element
    pub fn without_player(mut self) -> Self {
        self.refuse_player = true;
        self
    }

    pub fn entity(&self, handle: Handle) -> Option<&HeadlessEntity> {
        self.entities.get(&handle)
    }

    pub fn entities_of(&self, kind: EntityKind) -> Vec<&HeadlessEntity> {
        self.entities.values().filter(|e| e.kind == kind).collect()
    }

    /// Live entities, player included
    pub fn live(&self) -> usize {
        self.entities.len()
    }

    pub fn created(&self) -> usize {
        self.created
    }

    pub fn removed(&self) -> usize {
        self.removed
    }

    /// Removals of handles that were already gone
    pub fn failed_removals(&self) -> usize {
        self.failed_removals
    }

    pub fn hud(&self) -> Option<&Hud> {
        self.hud.as_ref()
    }

    pub fn hud_updates(&self) -> usize {
        self.hud_updates
    }

    /// Drop every entity except the player behind the caller's back
    pub fn clear_all_but_player(&mut self) {
        self.entities.retain(|_, e| e.kind == EntityKind::Player);
    }
}

impl Display for HeadlessDisplay {
    fn create_entity(&mut self, kind: EntityKind, style: &Style) -> Result<Handle, DisplayError> {
        if kind == EntityKind::Player && self.refuse_player {
            return Err(DisplayError::MissingElement("frog"));
        }
        let handle = Handle(self.next_handle);
        self.next_handle += 1;
        self.created += 1;
        self.entities.insert(
            handle,
            HeadlessEntity {
                kind,
                style: *style,
                x: 0.0,
                y: 0.0,
            },
        );
        Ok(handle)
    }

    fn set_position(&mut self, handle: Handle, x: f32, y: f32) {
        if let Some(entity) = self.entities.get_mut(&handle) {
            entity.x = x;
            entity.y = y;
        }
    }

    fn remove(&mut self, handle: Handle) -> Result<(), DisplayError> {
        match self.entities.remove(&handle) {
            Some(_) => {
                self.removed += 1;
                Ok(())
            }
            None => {
                self.failed_removals += 1;
                Err(DisplayError::UnknownHandle(handle))
            }
        }
    }

    fn query_height(&self, handle: Handle) -> Option<f32> {
        let entity = self.entities.get(&handle)?;
        match entity.kind {
            EntityKind::Player => self.player_height.or(entity.style.height),
            _ => entity.style.height,
        }
    }

    fn show_hud(&mut self, hud: &Hud) {
        self.hud = Some(hud.clone());
        self.hud_updates += 1;
    }
}
