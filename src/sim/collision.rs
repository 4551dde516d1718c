//! Collision tests between the bird, pipes and pickups
//!
//! All tests use open intervals: boxes that only touch along an edge do not
//! collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Pipe;

/// Axis-aligned box in canvas coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Aabb {
    /// Box of the given size centered on `center`
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            left: center.x - width / 2.0,
            right: center.x + width / 2.0,
            top: center.y - height / 2.0,
            bottom: center.y + height / 2.0,
        }
    }

    /// Strict horizontal overlap with the span [left, right]
    #[inline]
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.right > left && self.left < right
    }
}

/// Check a bird box against a pipe pair.
///
/// A hit needs horizontal overlap with the pipe and the box poking above the
/// gap top or below the gap bottom.
pub fn bird_pipe_collision(bird: &Aabb, pipe: &Pipe) -> bool {
    if !bird.overlaps_x(pipe.x, pipe.right()) {
        return false;
    }
    bird.top < pipe.gap || bird.bottom > pipe.gap_end()
}

/// Pickup proximity: both axis distances strictly below `range`
pub fn within_pickup_range(a: Vec2, b: Vec2, range: f32) -> bool {
    let d = (a - b).abs();
    d.x < range && d.y < range
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipe_at(x: f32, gap: f32, gap_size: f32) -> Pipe {
        Pipe::new(1, x, gap, gap_size)
    }

    #[test]
    fn test_inside_gap_is_safe() {
        let pipe = pipe_at(90.0, 100.0, 180.0);
        let bird = Aabb::centered(Vec2::new(100.0, 190.0), 30.0, 25.0);
        assert!(!bird_pipe_collision(&bird, &pipe));
    }

    #[test]
    fn test_touching_gap_top_is_not_a_hit() {
        let pipe = pipe_at(90.0, 100.0, 180.0);
        // Box top exactly on the gap top
        let bird = Aabb::centered(Vec2::new(100.0, 112.5), 30.0, 25.0);
        assert_eq!(bird.top, 100.0);
        assert!(!bird_pipe_collision(&bird, &pipe));

        // One unit higher pokes into the top pipe
        let bird = Aabb::centered(Vec2::new(100.0, 111.5), 30.0, 25.0);
        assert!(bird_pipe_collision(&bird, &pipe));
    }

    #[test]
    fn test_touching_gap_bottom_is_not_a_hit() {
        let pipe = pipe_at(90.0, 100.0, 180.0);
        // Box bottom exactly on the gap bottom (280)
        let bird = Aabb::centered(Vec2::new(100.0, 267.5), 30.0, 25.0);
        assert_eq!(bird.bottom, 280.0);
        assert!(!bird_pipe_collision(&bird, &pipe));

        let bird = Aabb::centered(Vec2::new(100.0, 268.5), 30.0, 25.0);
        assert!(bird_pipe_collision(&bird, &pipe));
    }

    #[test]
    fn test_touching_pipe_side_is_not_a_hit() {
        // Bird right edge (115) exactly on the pipe's left edge
        let pipe = pipe_at(115.0, 300.0, 100.0);
        let bird = Aabb::centered(Vec2::new(100.0, 50.0), 30.0, 25.0);
        assert!(!bird_pipe_collision(&bird, &pipe));

        let pipe = pipe_at(114.0, 300.0, 100.0);
        assert!(bird_pipe_collision(&bird, &pipe));

        // Bird left edge (85) exactly on the pipe's right edge
        let pipe = pipe_at(25.0, 300.0, 100.0);
        assert!(!bird_pipe_collision(&bird, &pipe));
    }

    #[test]
    fn test_pickup_range() {
        let bird = Vec2::new(100.0, 200.0);
        assert!(within_pickup_range(bird, Vec2::new(129.0, 171.0), 30.0));
        assert!(!within_pickup_range(bird, Vec2::new(130.0, 200.0), 30.0));
        assert!(!within_pickup_range(bird, Vec2::new(100.0, 230.0), 30.0));
        assert!(within_pickup_range(bird, Vec2::new(71.0, 229.0), 30.0));
    }
}
