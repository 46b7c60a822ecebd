//! Mirror the session into a display
//!
//! Each sync creates handles for new entities, moves live ones and removes
//! those the session dropped. Removal failures (already gone) are ignored;
//! creation failures are retried on the next sync.

use std::collections::{HashMap, HashSet};

use super::{Display, EntityKind, Handle, Hud, Style};
use crate::sim::{EntityId, GameSession};

pub struct SceneSync {
    player: Handle,
    entities: HashMap<EntityId, Vec<Handle>>,
    last_hud: Option<Hud>,
}

impl SceneSync {
    pub fn new(player: Handle) -> Self {
        Self {
            player,
            entities: HashMap::new(),
            last_hud: None,
        }
    }

    pub fn player(&self) -> Handle {
        self.player
    }

    /// Number of mirrored (non-player) entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Bring the display in line with the session
    pub fn sync<D: Display + ?Sized>(&mut self, display: &mut D, session: &GameSession) {
        display.set_position(self.player, session.player.left, session.player.y);

        let mut live = HashSet::new();
        let height = session.world.height;

        for o in &session.obstacles {
            live.insert(o.id);
            let parts = [
                (EntityKind::PipeTop, Style::sized(o.width, o.top_height)),
                (EntityKind::PipeBottom, Style::sized(o.width, o.bottom_height)),
            ];
            if let Some(handles) = self.ensure(display, o.id, &parts) {
                let x = o.x.round();
                display.set_position(handles[0], x, 0.0);
                display.set_position(handles[1], x, height - o.bottom_height);
            }
        }

        for c in &session.clouds {
            live.insert(c.id);
            let parts = [(EntityKind::Cloud(c.size), Style::default())];
            if let Some(handles) = self.ensure(display, c.id, &parts) {
                display.set_position(handles[0], c.pos.x, c.pos.y);
            }
        }

        for p in &session.puffs {
            live.insert(p.id);
            let parts = [(EntityKind::Puff(p.variant), Style::default())];
            if let Some(handles) = self.ensure(display, p.id, &parts) {
                display.set_position(handles[0], p.pos.x, p.pos.y);
            }
        }

        self.entities.retain(|id, handles| {
            if live.contains(id) {
                return true;
            }
            for handle in handles.iter() {
                if let Err(e) = display.remove(*handle) {
                    log::debug!("Ignoring stale removal: {}", e);
                }
            }
            false
        });
    }

    /// Push the HUD if it differs from what was last shown
    pub fn show_hud<D: Display + ?Sized>(&mut self, display: &mut D, hud: Hud) {
        if self.last_hud.as_ref() != Some(&hud) {
            display.show_hud(&hud);
            self.last_hud = Some(hud);
        }
    }

    fn ensure<D: Display + ?Sized>(
        &mut self,
        display: &mut D,
        id: EntityId,
        parts: &[(EntityKind, Style)],
    ) -> Option<&[Handle]> {
        if !self.entities.contains_key(&id) {
            let mut handles = Vec::with_capacity(parts.len());
            for (kind, style) in parts {
                match display.create_entity(*kind, style) {
                    Ok(handle) => handles.push(handle),
                    Err(e) => {
                        log::warn!("Could not create {:?} for entity {}: {}", kind, id, e);
                        for handle in handles {
                            let _ = display.remove(handle);
                        }
                        return None;
                    }
                }
            }
            self.entities.insert(id, handles);
        }
        self.entities.get(&id).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WorldSize;
    use crate::renderer::HeadlessDisplay;
    use crate::sim::{FlapVariant, Obstacle};
    use crate::tuning::Tuning;

    fn setup() -> (HeadlessDisplay, SceneSync, GameSession) {
        let mut display = HeadlessDisplay::new();
        let player = display.create_entity(EntityKind::Player, &Style::default()).unwrap();
        let session = GameSession::new(Tuning::default(), WorldSize::new(400.0, 600.0), 40.0, 0, 1);
        (display, SceneSync::new(player), session)
    }

    fn pipe(id: u32, x: f32) -> Obstacle {
        Obstacle {
            id,
            x,
            width: 52.0,
            top_height: 120.0,
            gap: 150.0,
            bottom_height: 330.0,
            passed: false,
        }
    }

    #[test]
    fn test_pipe_pair_mirrored() {
        let (mut display, mut scene, mut session) = setup();
        session.obstacles.push(pipe(7, 300.4));
        scene.sync(&mut display, &session);

        let tops = display.entities_of(EntityKind::PipeTop);
        let bottoms = display.entities_of(EntityKind::PipeBottom);
        assert_eq!(tops.len(), 1);
        assert_eq!(bottoms.len(), 1);
        assert_eq!((tops[0].x, tops[0].y), (300.0, 0.0));
        assert_eq!((bottoms[0].x, bottoms[0].y), (300.0, 270.0));
        assert_eq!(tops[0].style.height, Some(120.0));
    }

    #[test]
    fn test_dropped_entities_removed_once() {
        let (mut display, mut scene, mut session) = setup();
        session.obstacles.push(pipe(7, 300.0));
        session.start();
        session.spawn_puff(FlapVariant::Squeaky);
        session.obstacles.push(pipe(8, 200.0));
        scene.sync(&mut display, &session);
        assert_eq!(scene.len(), 2);

        session.start();
        scene.sync(&mut display, &session);
        scene.sync(&mut display, &session);
        assert!(scene.is_empty());
        // Two pipe handles plus one puff handle
        assert_eq!(display.removed(), 3);
        assert_eq!(display.failed_removals(), 0);
    }

    #[test]
    fn test_stale_removal_is_ignored() {
        let (mut display, mut scene, mut session) = setup();
        session.obstacles.push(pipe(7, 300.0));
        scene.sync(&mut display, &session);
        // Something else already removed the nodes
        display.clear_all_but_player();
        session.obstacles.clear();
        scene.sync(&mut display, &session);
        assert!(scene.is_empty());
        assert_eq!(display.failed_removals(), 2);
    }

    #[test]
    fn test_hud_pushed_only_on_change() {
        let (mut display, mut scene, session) = setup();
        let hud = Hud {
            phase: session.phase,
            score: 0,
            best: 0,
            diagnostics: None,
        };
        scene.show_hud(&mut display, hud.clone());
        scene.show_hud(&mut display, hud.clone());
        assert_eq!(display.hud_updates(), 1);
        scene.show_hud(&mut display, Hud { score: 1, ..hud });
        assert_eq!(display.hud_updates(), 2);
    }

    #[test]
    fn test_player_follows_session() {
        let (mut display, mut scene, mut session) = setup();
        session.player.y = 321.0;
        scene.sync(&mut display, &session);
        let player = display.entity(scene.player()).unwrap();
        assert_eq!((player.x, player.y), (50.0, 321.0));
    }
}
