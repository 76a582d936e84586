use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use meadow_core::level::{FloatSpec, PlatformSpec};

use crate::collision::Aabb;

/// Unscaled platform sprite footprint in pixels.
pub const PLATFORM_BASE_WIDTH: f32 = 200.0;
pub const PLATFORM_BASE_HEIGHT: f32 = 32.0;

/// Vertical oscillation between a base position and `base - amount` pixels
/// above it, with a sinusoidal ease and infinite yoyo. One half-cycle (base
/// to peak) takes `duration` seconds; the full period is twice that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatMotion {
    pub amount: f32,
    pub duration: f32,
    pub elapsed: f32,
    /// Motion holds at the base position until activated.
    pub active: bool,
}

impl FloatMotion {
    pub fn new(spec: FloatSpec, active: bool) -> Self {
        Self {
            amount: spec.amount,
            duration: spec.duration,
            elapsed: 0.0,
            active,
        }
    }

    pub fn start(&mut self) {
        self.active = true;
    }

    /// Advance and return the current offset above the base position.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if self.active {
            self.elapsed += dt;
        }
        self.offset()
    }

    /// Eased yoyo offset: amount * (1 - cos(pi*t/d)) / 2, periodic over 2d.
    pub fn offset(&self) -> f32 {
        if !self.active || self.duration <= 0.0 {
            return 0.0;
        }
        self.amount * 0.5 * (1.0 - (PI * self.elapsed / self.duration).cos())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
enum Motion {
    Static,
    Floating(FloatMotion),
}

/// A rigid platform. Kinematic when floating: the animator owns its position,
/// it pushes the player but is never displaced by collision response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    /// Rest position; a floating platform oscillates between here and
    /// `base_y - amount`.
    pub base_y: f32,
    pub y: f32,
    pub half_w: f32,
    pub half_h: f32,
    motion: Motion,
    aabb: Aabb,
}

impl Platform {
    /// Build from a spec. Floating motion starts inactive; the session's
    /// scheduler activates it once the float delay elapses.
    pub fn from_spec(spec: &PlatformSpec) -> Self {
        let half_w = PLATFORM_BASE_WIDTH * spec.scale_x / 2.0;
        let half_h = PLATFORM_BASE_HEIGHT * spec.scale_y / 2.0;
        let motion = if spec.floats {
            Motion::Floating(FloatMotion::new(spec.float, false))
        } else {
            Motion::Static
        };
        Self {
            x: spec.x,
            base_y: spec.y,
            y: spec.y,
            half_w,
            half_h,
            motion,
            aabb: Aabb::new(spec.x, spec.y, half_w, half_h),
        }
    }

    pub fn is_floating(&self) -> bool {
        matches!(self.motion, Motion::Floating(_))
    }

    /// Begin oscillating. No-op for static platforms.
    pub fn start_float(&mut self) {
        if let Motion::Floating(m) = &mut self.motion {
            m.start();
        }
    }

    /// Advance kinematics and resync the collider to the animated position.
    /// Static platforms return immediately and cost nothing per tick.
    pub fn advance(&mut self, dt: f32) {
        let Motion::Floating(motion) = &mut self.motion else {
            return;
        };
        let offset = motion.advance(dt);
        self.y = self.base_y - offset;
        self.sync_collider();
    }

    fn sync_collider(&mut self) {
        self.aabb = Aabb::new(self.x, self.y, self.half_w, self.half_h);
    }

    /// Collider at the platform's current-tick position.
    pub fn aabb(&self) -> Aabb {
        self.aabb
    }
}
