//! Physics integration
//!
//! The frog falls under constant gravity scaled by the pacer's step scale.
//! Pipes scroll a fixed distance per step regardless of frame time so the
//! spawn-to-score rhythm stays constant; clouds drift at their own speed and
//! are allowed to stall under load.

use super::pacer::Step;
use super::state::{Cloud, Obstacle, Player, Puff};
use crate::WorldSize;
use crate::consts::CLOUD_EXIT_MARGIN;
use crate::tuning::Tuning;

/// Advance the frog one step: velocity first, then position
#[inline]
pub fn integrate_player(player: &mut Player, step: &Step, gravity: f32) {
    player.vel += gravity * step.scale;
    player.y += player.vel;
}

/// Upward impulse; replaces the current velocity
#[inline]
pub fn flap(player: &mut Player, flap_velocity: f32) {
    player.vel = flap_velocity;
}

/// Scroll pipes left and drop those whose right edge left the world.
/// Returns how many were retired.
pub fn scroll_obstacles(obstacles: &mut Vec<Obstacle>, speed: f32) -> usize {
    let before = obstacles.len();
    for obstacle in obstacles.iter_mut() {
        obstacle.x -= speed;
    }
    obstacles.retain(|o| o.right() >= 0.0);
    before - obstacles.len()
}

/// Drift clouds rightward and retire old or departed ones.
///
/// Motion is skipped when the last frame was slow; age-based cleanup always
/// runs.
pub fn drift_clouds(clouds: &mut Vec<Cloud>, step: &Step, now: f64, world: WorldSize, tuning: &Tuning) {
    if step.elapsed_ms <= tuning.cloud_drift_max_frame_ms {
        for cloud in clouds.iter_mut() {
            cloud.pos.x += cloud.speed;
        }
    }
    let exit_x = world.width + CLOUD_EXIT_MARGIN;
    clouds.retain(|c| c.pos.x <= exit_x && now - c.born_ms <= tuning.cloud_max_age_ms);
}

/// Age puffs by the clamped step and drop finished ones
pub fn age_puffs(puffs: &mut Vec<Puff>, step: &Step) {
    for puff in puffs.iter_mut() {
        puff.age_ms += step.step_ms;
    }
    puffs.retain(|p| !p.expired());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{CloudSize, FlapVariant};
    use glam::Vec2;

    fn step(elapsed_ms: f32, scale: f32) -> Step {
        Step {
            elapsed_ms,
            step_ms: elapsed_ms.min(50.0),
            scale,
        }
    }

    fn player() -> Player {
        Player::new(&Tuning::default(), 40.0)
    }

    fn obstacle(id: u32, x: f32) -> Obstacle {
        Obstacle {
            id,
            x,
            width: 52.0,
            top_height: 200.0,
            gap: 150.0,
            bottom_height: 250.0,
            passed: false,
        }
    }

    #[test]
    fn test_gravity_scaled_by_step() {
        let mut p = player();
        integrate_player(&mut p, &step(16.67, 1.0), 0.7);
        assert!((p.vel - 0.7).abs() < 1e-6);
        assert!((p.y - 200.7).abs() < 1e-4);

        let mut slow = player();
        integrate_player(&mut slow, &step(33.34, 2.0), 0.7);
        assert!((slow.vel - 1.4).abs() < 1e-6);
    }

    #[test]
    fn test_flap_overrides_velocity() {
        let mut p = player();
        p.vel = 12.0;
        flap(&mut p, -9.5);
        assert_eq!(p.vel, -9.5);
        p.vel = -20.0;
        flap(&mut p, -9.5);
        assert_eq!(p.vel, -9.5);
    }

    #[test]
    fn test_scroll_is_not_time_scaled() {
        let mut obstacles = vec![obstacle(1, 300.0)];
        scroll_obstacles(&mut obstacles, 2.5);
        assert_eq!(obstacles[0].x, 297.5);
    }

    #[test]
    fn test_obstacle_retired_when_right_edge_exits() {
        let mut obstacles = vec![obstacle(1, -49.0), obstacle(2, 100.0)];
        // -51.5 + 52 = 0.5, still visible
        assert_eq!(scroll_obstacles(&mut obstacles, 2.5), 0);
        // -54.0 + 52 < 0
        assert_eq!(scroll_obstacles(&mut obstacles, 2.5), 1);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].id, 2);
    }

    #[test]
    fn test_clouds_skip_drift_on_slow_frames() {
        let tuning = Tuning::default();
        let world = WorldSize::default();
        let mut clouds = vec![Cloud {
            id: 1,
            size: CloudSize::Small,
            pos: Vec2::new(0.0, 50.0),
            speed: 0.5,
            born_ms: 0.0,
        }];
        drift_clouds(&mut clouds, &step(16.0, 1.0), 16.0, world, &tuning);
        assert_eq!(clouds[0].pos.x, 0.5);
        drift_clouds(&mut clouds, &step(90.0, 3.0), 106.0, world, &tuning);
        assert_eq!(clouds[0].pos.x, 0.5);
    }

    #[test]
    fn test_clouds_retire_by_age_and_exit() {
        let tuning = Tuning::default();
        let world = WorldSize::default();
        let mut clouds = vec![
            Cloud {
                id: 1,
                size: CloudSize::Large,
                pos: Vec2::new(0.0, 50.0),
                speed: 0.1,
                born_ms: 0.0,
            },
            Cloud {
                id: 2,
                size: CloudSize::Small,
                pos: Vec2::new(world.width + 149.8, 50.0),
                speed: 0.5,
                born_ms: 119_000.0,
            },
        ];
        drift_clouds(&mut clouds, &step(16.0, 1.0), 120_001.0, world, &tuning);
        assert!(clouds.is_empty());
    }

    #[test]
    fn test_puffs_expire_by_variant() {
        let p = player();
        let mut puffs = vec![
            Puff::new(1, FlapVariant::Squeaky, &p),
            Puff::new(2, FlapVariant::LongRippling, &p),
        ];
        for _ in 0..13 {
            age_puffs(&mut puffs, &step(50.0, 3.0));
        }
        // 650ms: squeaky (600ms) gone, rippling (1500ms) still around
        assert_eq!(puffs.len(), 1);
        assert_eq!(puffs[0].variant, FlapVariant::LongRippling);
    }
}
