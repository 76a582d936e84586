pub mod events;
pub mod input;
pub mod level;
pub mod scheduler;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::level::{FloatSpec, GoalConfig, HeartSpec, LevelDefinition, PlatformSpec};

    /// Static platform spec centered at (x, y) with the given sprite scales.
    pub fn platform_at(x: f32, y: f32, scale_x: f32, scale_y: f32) -> PlatformSpec {
        PlatformSpec {
            x,
            y,
            scale_x,
            scale_y,
            floats: false,
            float: FloatSpec {
                amount: 10.0,
                duration: 2.0,
            },
            float_delay: 0.0,
        }
    }

    /// Oscillating platform spec.
    pub fn floating_platform_at(
        x: f32,
        y: f32,
        amount: f32,
        duration: f32,
        delay: f32,
    ) -> PlatformSpec {
        PlatformSpec {
            x,
            y,
            scale_x: 1.0,
            scale_y: 1.0,
            floats: true,
            float: FloatSpec { amount, duration },
            float_delay: delay,
        }
    }

    /// Non-floating heart spec.
    pub fn heart_at(x: f32, y: f32) -> HeartSpec {
        HeartSpec { x, y, float: None }
    }

    /// Minimal playable level: one wide static floor spanning the world, the
    /// default player start above it, and the goal standing on the floor far
    /// to the right of the start.
    pub fn flat_level() -> LevelDefinition {
        LevelDefinition {
            platforms: vec![platform_at(550.0, 600.0, 6.0, 1.0)],
            goal: GoalConfig {
                x: 900.0,
                y: 584.0,
                scale: 1.0,
                immovable: true,
            },
            ..LevelDefinition::default()
        }
    }
}
