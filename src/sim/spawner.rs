//! Entity spawning
//!
//! Pipes arrive at the right edge on a fixed interval under a population cap,
//! clouds drift in from the left on a randomized interval, and each flap
//! leaves a short-lived puff. Spawning only appends; retirement lives in
//! `physics`.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::session::GameSession;
use super::state::{Cloud, CloudSize, EntityId, FlapVariant, Obstacle, Puff};
use crate::WorldSize;
use crate::consts::CLOUD_START_X;
use crate::tuning::Tuning;

/// When each spawner last fired
#[derive(Debug, Clone)]
pub struct SpawnTimers {
    pub last_obstacle_ms: Option<f64>,
    pub last_cloud_ms: Option<f64>,
    /// Current wait before the next cloud, redrawn after each one
    pub cloud_interval_ms: f64,
}

impl SpawnTimers {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            last_obstacle_ms: None,
            last_cloud_ms: None,
            cloud_interval_ms: tuning.cloud_initial_interval_ms,
        }
    }

    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    /// Interval elapsed (or nothing spawned yet) and the field is below the cap
    pub fn obstacle_due(&self, now: f64, live: usize, tuning: &Tuning) -> bool {
        if live >= tuning.max_pipes {
            return false;
        }
        match self.last_obstacle_ms {
            None => true,
            Some(last) => now - last > tuning.pipe_interval_ms,
        }
    }

    pub fn cloud_due(&self, now: f64) -> bool {
        match self.last_cloud_ms {
            None => true,
            Some(last) => now - last > self.cloud_interval_ms,
        }
    }
}

/// Build a pipe pair at the right edge.
///
/// Heights are whole pixels so `top + gap + bottom` equals the world height
/// exactly. The world must pass [`Tuning::obstacle_fits`].
pub fn roll_obstacle(id: EntityId, world: WorldSize, tuning: &Tuning, rng: &mut Pcg32) -> Obstacle {
    let min_top = tuning.min_pipe_height.ceil() as i32;
    let max_top = (tuning.max_top_height(world.height).floor() as i32).max(min_top);
    let top_height = rng.random_range(min_top..=max_top) as f32;
    let bottom_height = (world.height - top_height - tuning.pipe_gap).max(0.0);

    let obstacle = Obstacle {
        id,
        x: world.width,
        width: tuning.pipe_width,
        top_height,
        gap: tuning.pipe_gap,
        bottom_height,
        passed: false,
    };
    debug_assert!(
        obstacle.top_height + obstacle.gap + obstacle.bottom_height == world.height,
        "pipe geometry does not fill the world: {obstacle:?}"
    );
    obstacle
}

/// Build a cloud just off the left edge
pub fn roll_cloud(id: EntityId, world: WorldSize, now: f64, rng: &mut Pcg32) -> Cloud {
    let size = CloudSize::ALL[rng.random_range(0..CloudSize::ALL.len())];
    let span = (world.height - 100.0).max(0.0);
    let y = 20.0 + rng.random::<f32>() * span;
    let speed = rng.random_range(size.speed_range());

    Cloud {
        id,
        size,
        pos: Vec2::new(CLOUD_START_X, y),
        speed,
        born_ms: now,
    }
}

/// Draw the wait before the next cloud from `[min, max)`
pub fn roll_cloud_interval(tuning: &Tuning, rng: &mut Pcg32) -> f64 {
    if tuning.cloud_max_interval_ms <= tuning.cloud_min_interval_ms {
        return tuning.cloud_min_interval_ms;
    }
    rng.random_range(tuning.cloud_min_interval_ms..tuning.cloud_max_interval_ms)
}

/// Run both timed spawners for the step at `now`
pub fn spawn_due(session: &mut GameSession, now: f64) {
    if session
        .timers
        .obstacle_due(now, session.obstacles.len(), &session.tuning)
    {
        session.timers.last_obstacle_ms = Some(now);
        if !session.tuning.obstacle_fits(session.world.height) {
            log::debug!(
                "World height {} too short for a pipe pair, skipping spawn",
                session.world.height
            );
            spawn_cloud_due(session, now);
            return;
        }
        let id = session.next_entity_id();
        let obstacle = roll_obstacle(id, session.world, &session.tuning, &mut session.rng);
        log::debug!(
            "Pipe {} spawned (top {}, bottom {})",
            id,
            obstacle.top_height,
            obstacle.bottom_height
        );
        session.obstacles.push(obstacle);
    }

    spawn_cloud_due(session, now);
}

fn spawn_cloud_due(session: &mut GameSession, now: f64) {
    if session.timers.cloud_due(now) {
        let id = session.next_entity_id();
        let cloud = roll_cloud(id, session.world, now, &mut session.rng);
        session.clouds.push(cloud);
        session.timers.last_cloud_ms = Some(now);
        session.timers.cloud_interval_ms = roll_cloud_interval(&session.tuning, &mut session.rng);
    }
}

/// Leave a puff behind the frog, evicting the oldest when at the cap
pub fn spawn_puff(session: &mut GameSession, variant: FlapVariant) {
    let cap = session.tuning.max_puffs;
    if cap == 0 {
        return;
    }
    while session.puffs.len() >= cap {
        session.puffs.remove(0);
    }
    let id = session.next_entity_id();
    let puff = Puff::new(id, variant, &session.player);
    session.puffs.push(puff);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn test_obstacle_spawns_at_right_edge() {
        let mut rng = Pcg32::seed_from_u64(7);
        let world = WorldSize::new(480.0, 640.0);
        let o = roll_obstacle(1, world, &Tuning::default(), &mut rng);
        assert_eq!(o.x, 480.0);
        assert!(!o.passed);
        assert_eq!(o.gap, 150.0);
    }

    #[test]
    fn test_obstacle_due_respects_interval_and_cap() {
        let tuning = Tuning::default();
        let mut timers = SpawnTimers::new(&tuning);
        assert!(timers.obstacle_due(0.0, 0, &tuning));
        timers.last_obstacle_ms = Some(1000.0);
        assert!(!timers.obstacle_due(4000.0, 0, &tuning));
        assert!(timers.obstacle_due(4000.1, 0, &tuning));
        // Full field blocks spawning even when overdue
        assert!(!timers.obstacle_due(99_000.0, 5, &tuning));
        assert!(timers.obstacle_due(99_000.0, 4, &tuning));
    }

    #[test]
    fn test_cloud_tiers_are_disjoint_and_ordered() {
        let small = CloudSize::Small.speed_range();
        let medium = CloudSize::Medium.speed_range();
        let large = CloudSize::Large.speed_range();
        assert!(large.end <= medium.start);
        assert!(medium.end <= small.start);
    }

    #[test]
    fn test_cloud_speed_matches_tier() {
        let mut rng = Pcg32::seed_from_u64(3);
        let world = WorldSize::default();
        for id in 0..200 {
            let cloud = roll_cloud(id, world, 0.0, &mut rng);
            assert!(cloud.size.speed_range().contains(&cloud.speed));
            assert!(cloud.pos.y >= 20.0 && cloud.pos.y < world.height - 80.0);
            assert_eq!(cloud.pos.x, CLOUD_START_X);
        }
    }

    #[test]
    fn test_cloud_interval_range() {
        let mut rng = Pcg32::seed_from_u64(11);
        let tuning = Tuning::default();
        for _ in 0..500 {
            let interval = roll_cloud_interval(&tuning, &mut rng);
            assert!((6000.0..14000.0).contains(&interval));
        }
    }

    #[test]
    fn test_puffs_capped_oldest_evicted() {
        let mut session = GameSession::new(Tuning::default(), WorldSize::default(), 40.0, 0, 1);
        for _ in 0..5 {
            spawn_puff(&mut session, FlapVariant::Squeaky);
        }
        assert_eq!(session.puffs.len(), 3);
        let ids: Vec<_> = session.puffs.iter().map(|p| p.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        // The two oldest were evicted
        assert_eq!(ids, vec![3, 4, 5]);
    }

    #[test]
    fn test_cloud_waits_for_redrawn_interval() {
        let tuning = Tuning::default();
        let mut session = GameSession::new(tuning.clone(), WorldSize::default(), 40.0, 0, 21);
        session.start();
        assert_eq!(session.timers.cloud_interval_ms, 8000.0);

        spawn_due(&mut session, 100.0);
        assert_eq!(session.clouds.len(), 1);
        let interval = session.timers.cloud_interval_ms;
        assert!((6000.0..14000.0).contains(&interval));

        // Exactly one interval later is not enough
        spawn_due(&mut session, 100.0 + interval);
        assert_eq!(session.clouds.len(), 1);

        spawn_due(&mut session, 100.0 + interval + 0.5);
        assert_eq!(session.clouds.len(), 2);
        assert_eq!(session.timers.last_cloud_ms, Some(100.0 + interval + 0.5));
        assert!((6000.0..14000.0).contains(&session.timers.cloud_interval_ms));
    }

    #[test]
    fn test_short_world_skips_pipes() {
        let tuning = Tuning::default();
        let world = WorldSize::new(400.0, 200.0);
        assert!(!tuning.obstacle_fits(world.height));
        let mut session = GameSession::new(tuning, world, 40.0, 0, 4);
        session.start();
        spawn_due(&mut session, 0.0);
        spawn_due(&mut session, 20_000.0);
        assert!(session.obstacles.is_empty());
        // Clouds are unaffected
        assert_eq!(session.clouds.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_obstacle_geometry(seed in any::<u64>(), height in 300u32..1200, width in 200u32..1600) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let tuning = Tuning::default();
            let world = WorldSize::new(width as f32, height as f32);
            let o = roll_obstacle(1, world, &tuning, &mut rng);
            prop_assert!(o.top_height >= tuning.min_pipe_height);
            prop_assert!(o.bottom_height >= tuning.min_pipe_height);
            prop_assert_eq!(o.top_height + o.gap + o.bottom_height, world.height);
        }
    }
}
