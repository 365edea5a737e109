//! Collision detection between the player and platforms
//!
//! Only axis-aligned boxes are involved. The interesting part is the landing
//! rule: a platform only catches the player when the player was above it at
//! the start of the tick and is now falling into it.

use glam::Vec2;

use super::entity::GameObject;

/// Separating-axis test for two axis-aligned rectangles given as min/max
/// corners. Touching edges count as overlapping.
#[inline]
pub fn aabb_overlap(a_min: Vec2, a_max: Vec2, b_min: Vec2, b_max: Vec2) -> bool {
    a_min.x <= b_max.x && a_max.x >= b_min.x && a_min.y <= b_max.y && a_max.y >= b_min.y
}

/// Whether `player` lands on `platform` this tick.
///
/// Requires a downward velocity, the player's bottom edge at
/// `previous_position` to be at or above the platform's top edge, and the
/// current boxes to overlap.
pub fn lands_on(player: &GameObject, previous_position: Vec2, platform: &GameObject) -> bool {
    if player.velocity.y >= 0.0 {
        return false;
    }

    let previous_bottom = previous_position.y - player.scale.y / 2.0;
    if previous_bottom < platform.top() {
        return false;
    }

    aabb_overlap(player.min(), player.max(), platform.min(), platform.max())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(x: f32, y: f32, vel_y: f32) -> GameObject {
        let mut player = GameObject::player(Vec2::new(x, y), Vec2::splat(140.0));
        player.velocity.y = vel_y;
        player
    }

    fn platform_at(x: f32, y: f32) -> GameObject {
        GameObject::platform(Vec2::new(x, y), Vec2::new(200.0, 50.0))
    }

    #[test]
    fn test_aabb_overlap() {
        let a = (Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(aabb_overlap(a.0, a.1, Vec2::new(5.0, 5.0), Vec2::new(15.0, 15.0)));
        assert!(!aabb_overlap(a.0, a.1, Vec2::new(11.0, 0.0), Vec2::new(20.0, 10.0)));
        assert!(!aabb_overlap(a.0, a.1, Vec2::new(0.0, -20.0), Vec2::new(10.0, -0.5)));
    }

    #[test]
    fn test_aabb_touching_edges_overlap() {
        let a = (Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(aabb_overlap(a.0, a.1, Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0)));
        assert!(aabb_overlap(a.0, a.1, Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0)));
    }

    #[test]
    fn test_aabb_containment() {
        assert!(aabb_overlap(
            Vec2::new(-100.0, -100.0),
            Vec2::new(100.0, 100.0),
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, 1.0)
        ));
    }

    #[test]
    fn test_lands_when_falling_from_above() {
        let platform = platform_at(0.0, -100.0); // top at -75
        let player = player_at(0.0, -8.0, -500.0); // bottom at -78
        assert!(lands_on(&player, Vec2::new(0.0, -3.0), &platform));
    }

    #[test]
    fn test_no_landing_while_rising() {
        let platform = platform_at(0.0, -100.0);
        let player = player_at(0.0, -100.0, 300.0);
        assert!(!lands_on(&player, Vec2::new(0.0, 200.0), &platform));

        let resting = player_at(0.0, -100.0, 0.0);
        assert!(!lands_on(&resting, Vec2::new(0.0, 200.0), &platform));
    }

    #[test]
    fn test_no_landing_from_below() {
        let platform = platform_at(0.0, -100.0);
        // Was already under the top edge before moving
        let player = player_at(0.0, -40.0, -100.0);
        assert!(!lands_on(&player, Vec2::new(0.0, -30.0), &platform));
    }

    #[test]
    fn test_no_landing_beside_platform() {
        let platform = platform_at(0.0, -100.0);
        let player = player_at(300.0, -8.0, -500.0);
        assert!(!lands_on(&player, Vec2::new(300.0, -3.0), &platform));
    }
}
