use serde::{Deserialize, Serialize};

use meadow_core::events::Locomotion;
use meadow_core::input::InputSnapshot;
use meadow_core::level::{AirControl, PlayerConfig, Point, Rect};

/// Engine gravity (px/s^2, downward). Levels add `player.gravity` on top.
pub const WORLD_GRAVITY: f32 = 800.0;
/// Minimum walking speed for a momentum-preserving directional jump.
pub const JUMP_DEADZONE: f32 = 50.0;
/// Upward impulse per airborne boost press (y-down: subtracted from vy).
pub const AIR_BOOST: f32 = 100.0;
/// No further boosting once vy is at or past this much upward speed. Caps
/// cumulative boosting so chaining presses cannot climb forever.
pub const AIR_BOOST_CAP: f32 = -100.0;
/// Margin below the world's bottom edge before a fall respawn triggers.
pub const FALL_MARGIN: f32 = 100.0;
/// Airborne vx below this snaps straight to zero instead of decaying.
const DECAY_SNAP: f32 = 1.0;

/// Horizontal facing, for the render layer's sprite flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

/// The single controllable character. Repositioned on respawn, never
/// destroyed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Result of the last solid resolution: contact against an upward-facing
    /// surface.
    pub grounded: bool,
    pub facing: Facing,
    pub locomotion: Locomotion,
}

impl PlayerState {
    pub fn new(start: Point) -> Self {
        Self {
            x: start.x,
            y: start.y,
            vx: 0.0,
            vy: 0.0,
            grounded: false,
            facing: Facing::Right,
            locomotion: Locomotion::Idle,
        }
    }

    /// Teleport to `at` and stop. Used by the fall respawn and the emergency
    /// reset.
    pub fn teleport(&mut self, at: Point) {
        self.x = at.x;
        self.y = at.y;
        self.vx = 0.0;
        self.vy = 0.0;
    }
}

/// Advance the player one tick: input response for the current super-state,
/// then gravity and integration. `grounded` is this tick's fresh
/// touching-ground query result, which selects the super-state.
pub fn step(
    player: &mut PlayerState,
    input: &InputSnapshot,
    cfg: &PlayerConfig,
    grounded: bool,
    dt: f32,
) {
    if grounded {
        step_grounded(player, input, cfg);
    } else {
        step_airborne(player, input, &cfg.air_control, dt);
    }

    player.vy += (WORLD_GRAVITY + cfg.gravity) * dt;
    player.x += player.vx * dt;
    player.y += player.vy * dt;
}

fn step_grounded(player: &mut PlayerState, input: &InputSnapshot, cfg: &PlayerConfig) {
    // Direct mapping, no ramp: held direction is full walking speed.
    if input.left_held {
        player.vx = -cfg.speed;
        player.facing = Facing::Left;
        player.locomotion = Locomotion::Walking;
    } else if input.right_held {
        player.vx = cfg.speed;
        player.facing = Facing::Right;
        player.locomotion = Locomotion::Walking;
    } else {
        player.vx = 0.0;
        player.locomotion = Locomotion::Idle;
    }

    if input.up_pressed {
        if player.vx.abs() > JUMP_DEADZONE {
            // Momentum-preserving arc.
            player.vx *= cfg.directional_jump_multiplier;
        } else {
            player.vx = 0.0;
        }
        player.vy = cfg.jump_velocity;
        player.locomotion = Locomotion::Airborne;
    } else if input.down_pressed {
        // Precision hop. Keeps the documented upward-signed impulse.
        player.vx = 0.0;
        player.vy = cfg.hop_velocity;
        player.locomotion = Locomotion::Airborne;
    }
}

fn step_airborne(player: &mut PlayerState, input: &InputSnapshot, air: &AirControl, dt: f32) {
    player.locomotion = Locomotion::Airborne;

    let cap = air.max_horizontal_speed;
    if input.left_held {
        player.vx = (player.vx - air.acceleration * dt).clamp(-cap, cap);
    } else if input.right_held {
        player.vx = (player.vx + air.acceleration * dt).clamp(-cap, cap);
    } else if player.vx.abs() > DECAY_SNAP {
        // Decay toward zero, clamped so the sign never flips.
        let remaining = player.vx.abs() - air.decay * dt;
        player.vx = player.vx.signum() * remaining.max(0.0);
    } else {
        player.vx = 0.0;
    }

    if input.up_pressed && player.vy > AIR_BOOST_CAP {
        player.vy -= AIR_BOOST;
    }
}

/// True once the player has fallen past the world's bottom edge plus margin.
pub fn fell_out(player: &PlayerState, world: &Rect) -> bool {
    player.y > world.y + world.height + FALL_MARGIN
}
