//! Score tracking
//!
//! A pipe scores once, the first step its trailing edge is left of the
//! world's midpoint. At the end of a run the score is compared against the
//! best exactly once; the caller persists the new best.

use super::state::{Obstacle, RunState};

/// Mark newly passed pipes and bump the score. Returns the points awarded.
pub fn award_passes(obstacles: &mut [Obstacle], run: &mut RunState, mid_x: f32) -> u32 {
    let mut awarded = 0;
    for obstacle in obstacles.iter_mut().filter(|o| !o.passed) {
        if obstacle.right() < mid_x {
            obstacle.passed = true;
            run.score = run.score.saturating_add(1);
            awarded += 1;
        }
    }
    awarded
}

/// End-of-run compare-and-update.
///
/// Returns the new best on a strict improvement. Only the first call after a
/// run ends does anything; later calls return `None` until [`RunState::reset`].
pub fn settle_run(run: &mut RunState) -> Option<u32> {
    if run.settled {
        return None;
    }
    run.settled = true;
    if run.score > run.best_score {
        run.best_score = run.score;
        Some(run.best_score)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipe(id: u32, x: f32) -> Obstacle {
        Obstacle {
            id,
            x,
            width: 52.0,
            top_height: 100.0,
            gap: 150.0,
            bottom_height: 350.0,
            passed: false,
        }
    }

    #[test]
    fn test_scores_when_trailing_edge_crosses_midpoint() {
        let mut run = RunState::new(0);
        let mut obstacles = vec![pipe(1, 148.0)];
        // Right edge 200 is not left of 200
        assert_eq!(award_passes(&mut obstacles, &mut run, 200.0), 0);
        obstacles[0].x = 147.5;
        assert_eq!(award_passes(&mut obstacles, &mut run, 200.0), 1);
        assert_eq!(run.score, 1);
        assert!(obstacles[0].passed);
    }

    #[test]
    fn test_passed_pipe_never_scores_again() {
        let mut run = RunState::new(0);
        let mut obstacles = vec![pipe(1, 100.0)];
        award_passes(&mut obstacles, &mut run, 200.0);
        for _ in 0..100 {
            obstacles[0].x -= 2.5;
            award_passes(&mut obstacles, &mut run, 200.0);
        }
        assert_eq!(run.score, 1);
    }

    #[test]
    fn test_settle_only_on_strict_improvement() {
        let mut run = RunState::new(5);
        run.score = 5;
        assert_eq!(settle_run(&mut run), None);
        assert_eq!(run.best_score, 5);

        run.reset();
        run.score = 6;
        assert_eq!(settle_run(&mut run), Some(6));
        assert_eq!(run.best_score, 6);
    }

    #[test]
    fn test_settle_is_idempotent() {
        let mut run = RunState::new(0);
        run.score = 3;
        assert_eq!(settle_run(&mut run), Some(3));
        assert_eq!(settle_run(&mut run), None);
        run.score = 9;
        assert_eq!(settle_run(&mut run), None);
        assert_eq!(run.best_score, 3);
    }
}
