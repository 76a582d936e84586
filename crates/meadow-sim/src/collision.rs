use serde::{Deserialize, Serialize};

use crate::movement::PlayerState;
use crate::platforms::Platform;

/// Vertical tolerance for the touching-ground query, in pixels.
const GROUND_PROBE: f32 = 2.0;

/// Axis-aligned box in y-down screen space, stored as center + half extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub cx: f32,
    pub cy: f32,
    pub half_w: f32,
    pub half_h: f32,
}

impl Aabb {
    pub const fn new(cx: f32, cy: f32, half_w: f32, half_h: f32) -> Self {
        Self {
            cx,
            cy,
            half_w,
            half_h,
        }
    }

    pub fn left(&self) -> f32 {
        self.cx - self.half_w
    }

    pub fn right(&self) -> f32 {
        self.cx + self.half_w
    }

    /// Smallest y edge (visually the top, since y grows downward).
    pub fn top(&self) -> f32 {
        self.cy - self.half_h
    }

    pub fn bottom(&self) -> f32 {
        self.cy + self.half_h
    }

    /// Strict overlap; touching edges do not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }
}

/// Fresh touching-ground query: true when the player's feet rest on the top
/// face of any platform, at the platform's current-tick position.
pub fn touching_ground(player: &PlayerState, half_w: f32, half_h: f32, platforms: &[Platform]) -> bool {
    let feet = player.y + half_h;
    platforms.iter().any(|platform| {
        let a = platform.aabb();
        (feet - a.top()).abs() <= GROUND_PROBE
            && player.x + half_w > a.left()
            && player.x - half_w < a.right()
    })
}

/// Resolve the player against every platform by minimum penetration.
///
/// Platforms are kinematic: only the player is displaced, never the platform.
/// Returns true when at least one resolution pushed the player up off an
/// upward-facing surface this tick.
pub fn resolve_solid(
    player: &mut PlayerState,
    half_w: f32,
    half_h: f32,
    platforms: &[Platform],
) -> bool {
    let mut grounded = false;

    for platform in platforms {
        let tile = platform.aabb();
        let body = Aabb::new(player.x, player.y, half_w, half_h);
        if !body.overlaps(&tile) {
            continue;
        }

        // Penetration depth along each resolution direction.
        let push_up = body.bottom() - tile.top();
        let push_down = tile.bottom() - body.top();
        let push_left = body.right() - tile.left();
        let push_right = tile.right() - body.left();

        let min_push = push_up.min(push_down).min(push_left).min(push_right);

        if min_push == push_up {
            // Landed on the platform.
            player.y = tile.top() - half_h;
            if player.vy > 0.0 {
                player.vy = 0.0;
            }
            grounded = true;
        } else if min_push == push_down {
            // Hit head on the underside.
            player.y = tile.bottom() + half_h;
            if player.vy < 0.0 {
                player.vy = 0.0;
            }
        } else if min_push == push_left {
            player.x = tile.left() - half_w;
            player.vx = 0.0;
        } else {
            player.x = tile.right() + half_w;
            player.vx = 0.0;
        }
    }

    grounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use meadow_core::level::Point;
    use meadow_core::test_helpers::platform_at;

    const HALF_W: f32 = 13.5;
    const HALF_H: f32 = 18.75;

    fn floor() -> Vec<Platform> {
        // 200x32 sprite at (400, 500): top edge at y=484.
        vec![Platform::from_spec(&platform_at(400.0, 500.0, 1.0, 1.0))]
    }

    fn player_at(x: f32, y: f32) -> PlayerState {
        PlayerState::new(Point::new(x, y))
    }

    #[test]
    fn landing_from_above_sets_grounded_and_stops_fall() {
        let platforms = floor();
        let mut player = player_at(400.0, 480.0);
        player.vy = 300.0;

        let grounded = resolve_solid(&mut player, HALF_W, HALF_H, &platforms);

        assert!(grounded, "upward-facing contact must ground the player");
        assert_eq!(player.y, 484.0 - HALF_H, "feet snap to the platform top");
        assert_eq!(player.vy, 0.0, "downward velocity is absorbed");
    }

    #[test]
    fn head_bump_stops_upward_velocity_without_grounding() {
        let platforms = floor();
        // Player just below the platform's underside (y=516), rising.
        let mut player = player_at(400.0, 516.0 + HALF_H - 4.0);
        player.vy = -400.0;

        let grounded = resolve_solid(&mut player, HALF_W, HALF_H, &platforms);

        assert!(!grounded, "ceiling contact is not ground contact");
        assert_eq!(player.y, 516.0 + HALF_H);
        assert_eq!(player.vy, 0.0, "upward velocity is absorbed");
    }

    #[test]
    fn side_contact_stops_horizontal_motion() {
        let platforms = floor();
        // Overlapping the left face (x=300), vertically centered on the tile.
        let mut player = player_at(300.0 - HALF_W + 4.0, 500.0);
        player.vx = 150.0;

        let grounded = resolve_solid(&mut player, HALF_W, HALF_H, &platforms);

        assert!(!grounded);
        assert_eq!(player.x, 300.0 - HALF_W, "pushed back out of the wall");
        assert_eq!(player.vx, 0.0);
    }

    #[test]
    fn no_contact_leaves_player_untouched() {
        let platforms = floor();
        let mut player = player_at(400.0, 100.0);
        player.vy = 250.0;

        let grounded = resolve_solid(&mut player, HALF_W, HALF_H, &platforms);

        assert!(!grounded);
        assert_eq!(player.y, 100.0);
        assert_eq!(player.vy, 250.0);
    }

    #[test]
    fn touching_ground_is_a_fresh_positional_query() {
        let platforms = floor();
        let on_top = player_at(400.0, 484.0 - HALF_H);
        assert!(touching_ground(&on_top, HALF_W, HALF_H, &platforms));

        let hovering = player_at(400.0, 484.0 - HALF_H - 10.0);
        assert!(!touching_ground(&hovering, HALF_W, HALF_H, &platforms));

        let beside = player_at(200.0, 484.0 - HALF_H);
        assert!(
            !touching_ground(&beside, HALF_W, HALF_H, &platforms),
            "needs horizontal overlap with the platform"
        );
    }

    #[test]
    fn no_tunnel_at_one_platform_height_per_tick() {
        let platforms = floor();
        // Fastest step the contract covers: one platform height per tick.
        let mut player = player_at(400.0, 484.0 - HALF_H - 1.0);
        player.vy = 32.0 / (1.0 / 60.0);
        player.y += player.vy * (1.0 / 60.0);

        let grounded = resolve_solid(&mut player, HALF_W, HALF_H, &platforms);

        assert!(grounded, "must resolve upward, not pass through");
        assert_eq!(player.y, 484.0 - HALF_H);
    }
}
