use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A 2D point in screen space. Y grows downward, matching the level data files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Collision box of the player sprite, in unscaled sprite pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyBox {
    pub width: f32,
    pub height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for BodyBox {
    fn default() -> Self {
        Self {
            width: 180.0,
            height: 250.0,
            offset_x: 60.0,
            offset_y: 750.0,
        }
    }
}

/// Horizontal control parameters while airborne.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirControl {
    /// Horizontal speed cap while airborne (px/s).
    pub max_horizontal_speed: f32,
    /// Acceleration toward the held direction (px/s^2).
    pub acceleration: f32,
    /// Deceleration toward zero when no direction is held (px/s^2).
    pub decay: f32,
}

impl Default for AirControl {
    fn default() -> Self {
        Self {
            max_horizontal_speed: 200.0,
            acceleration: 200.0,
            decay: 80.0,
        }
    }
}

/// Player tuning. Velocities are y-down, so `jump_velocity` and `hop_velocity`
/// are negative (upward) impulses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub start: Point,
    pub respawn: Point,
    /// Ground walking speed (px/s).
    pub speed: f32,
    pub jump_velocity: f32,
    /// Applied to the current walking speed on a moving jump.
    pub directional_jump_multiplier: f32,
    /// Smaller vertical impulse for precision drops between close platforms.
    pub hop_velocity: f32,
    pub scale: f32,
    /// Extra gravity on top of the engine's world gravity (px/s^2).
    pub gravity: f32,
    pub body: BodyBox,
    pub air_control: AirControl,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start: Point::new(100.0, 550.0),
            respawn: Point::new(100.0, 400.0),
            speed: 150.0,
            jump_velocity: -600.0,
            directional_jump_multiplier: 2.5,
            hop_velocity: -350.0,
            scale: 0.15,
            gravity: 100.0,
            body: BodyBox::default(),
            air_control: AirControl::default(),
        }
    }
}

/// The goal character the player must reach. `y` is the feet position
/// (the sprite is anchored at its bottom edge).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalConfig {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub immovable: bool,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            x: 50.0,
            y: 180.0,
            scale: 2.0,
            immovable: true,
        }
    }
}

/// Vertical oscillation parameters. `duration` is one half-cycle in seconds
/// (base position to peak); the full yoyo period is twice that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatSpec {
    pub amount: f32,
    pub duration: f32,
}

/// One platform in the level. Position is the platform center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub x: f32,
    pub y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Whether this platform oscillates. The oscillation starts `float_delay`
    /// seconds after level start and never stops.
    pub floats: bool,
    pub float: FloatSpec,
    pub float_delay: f32,
}

/// One collectible heart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeartSpec {
    pub x: f32,
    pub y: f32,
    pub float: Option<FloatSpec>,
}

/// Camera and world extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub camera: Rect,
    pub world: Rect,
}

impl Default for Bounds {
    fn default() -> Self {
        let rect = Rect {
            x: 0.0,
            y: -200.0,
            width: 1100.0,
            height: 800.0,
        };
        Self {
            camera: rect,
            world: rect,
        }
    }
}

/// Immutable description of one level, loaded once per session.
///
/// Every field has a documented fallback used when the source data is absent
/// or malformed, so a definition is never partially invalid: field-level
/// faults degrade to field-level defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub player: PlayerConfig,
    pub goal: GoalConfig,
    pub platforms: Vec<PlatformSpec>,
    pub hearts: Vec<HeartSpec>,
    pub bounds: Bounds,
    /// Seconds after level start before the win gate arms.
    pub win_delay: f32,
}

impl Default for LevelDefinition {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            goal: GoalConfig::default(),
            platforms: Vec::new(),
            hearts: Vec::new(),
            bounds: Bounds::default(),
            win_delay: 3.0,
        }
    }
}

/// Default platform float half-cycle (level data carries milliseconds).
const PLATFORM_FLOAT_DURATION: f32 = 2.0;
/// Default heart float half-cycle.
const HEART_FLOAT_DURATION: f32 = 1.0;
/// Default float travel in pixels.
const FLOAT_AMOUNT: f32 = 10.0;
/// Stagger between consecutive platforms when no explicit delay is given.
const FLOAT_DELAY_STEP: f32 = 0.2;

fn num(obj: &Value, key: &str, fallback: f32) -> f32 {
    obj.get(key)
        .and_then(Value::as_f64)
        .map(|v| v as f32)
        .unwrap_or(fallback)
}

/// Duration field in milliseconds, converted to seconds.
fn millis(obj: &Value, key: &str, fallback_secs: f32) -> f32 {
    obj.get(key)
        .and_then(Value::as_f64)
        .map(|v| (v / 1000.0) as f32)
        .unwrap_or(fallback_secs)
}

fn point(obj: &Value, key: &str, fallback: Point) -> Point {
    match obj.get(key) {
        Some(v) => Point {
            x: num(v, "x", fallback.x),
            y: num(v, "y", fallback.y),
        },
        None => fallback,
    }
}

fn rect(obj: &Value, key: &str, fallback: Rect) -> Rect {
    match obj.get(key) {
        Some(v) => Rect {
            x: num(v, "x", fallback.x),
            y: num(v, "y", fallback.y),
            width: num(v, "width", fallback.width),
            height: num(v, "height", fallback.height),
        },
        None => fallback,
    }
}

impl PlayerConfig {
    fn from_json(v: &Value) -> Self {
        let d = Self::default();
        let body = v.get("body");
        let air = v.get("airControl");
        Self {
            start: point(v, "start", d.start),
            respawn: point(v, "respawn", d.respawn),
            speed: num(v, "speed", d.speed),
            jump_velocity: num(v, "jumpVelocity", d.jump_velocity),
            directional_jump_multiplier: num(
                v,
                "directionalJumpMultiplier",
                d.directional_jump_multiplier,
            ),
            hop_velocity: num(v, "hopVelocity", d.hop_velocity),
            scale: num(v, "scale", d.scale),
            gravity: num(v, "gravity", d.gravity),
            body: match body {
                Some(b) => BodyBox {
                    width: num(b, "width", d.body.width),
                    height: num(b, "height", d.body.height),
                    offset_x: num(b, "offsetX", d.body.offset_x),
                    offset_y: num(b, "offsetY", d.body.offset_y),
                },
                None => d.body,
            },
            air_control: match air {
                Some(a) => AirControl {
                    max_horizontal_speed: num(
                        a,
                        "maxHorizontalSpeed",
                        d.air_control.max_horizontal_speed,
                    ),
                    acceleration: num(a, "acceleration", d.air_control.acceleration),
                    decay: num(a, "decay", d.air_control.decay),
                },
                None => d.air_control,
            },
        }
    }
}

impl GoalConfig {
    fn from_json(v: &Value) -> Self {
        let d = Self::default();
        Self {
            x: num(v, "x", d.x),
            y: num(v, "y", d.y),
            scale: num(v, "scale", d.scale),
            immovable: v.get("immovable").and_then(Value::as_bool).unwrap_or(true),
        }
    }
}

impl PlatformSpec {
    /// `index` supplies the default float stagger for platforms that omit an
    /// explicit delay.
    fn from_json(v: &Value, index: usize) -> Self {
        let float = v.get("float").cloned().unwrap_or(Value::Null);
        // Older level files used a single `scale` key for the horizontal scale.
        let scale_x = match v.get("scaleX").and_then(Value::as_f64) {
            Some(s) => s as f32,
            None => num(v, "scale", 1.0),
        };
        Self {
            x: num(v, "x", 0.0),
            y: num(v, "y", 0.0),
            scale_x,
            scale_y: num(v, "scaleY", 1.0),
            floats: v.get("floats").and_then(Value::as_bool).unwrap_or(false),
            float: FloatSpec {
                amount: num(&float, "amount", FLOAT_AMOUNT),
                duration: millis(&float, "duration", PLATFORM_FLOAT_DURATION),
            },
            float_delay: millis(&float, "delay", index as f32 * FLOAT_DELAY_STEP),
        }
    }
}

impl HeartSpec {
    fn from_json(v: &Value) -> Self {
        Self {
            x: num(v, "x", 0.0),
            y: num(v, "y", 0.0),
            float: v.get("float").map(|f| FloatSpec {
                amount: num(f, "amount", FLOAT_AMOUNT),
                duration: millis(f, "duration", HEART_FLOAT_DURATION),
            }),
        }
    }
}

impl LevelDefinition {
    /// Build a definition from untyped JSON, field by field. Absent or
    /// non-numeric fields fall back to their documented defaults without
    /// affecting any other field.
    pub fn from_json(data: &Value) -> Self {
        let d = Self::default();
        let player = data.get("player").cloned().unwrap_or(Value::Null);
        let goal = data.get("goal").cloned().unwrap_or(Value::Null);
        let meta = data.get("meta").cloned().unwrap_or(Value::Null);
        let bounds = data.get("bounds").cloned().unwrap_or(Value::Null);

        let platforms = data
            .get("platforms")
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .enumerate()
                    .map(|(i, p)| PlatformSpec::from_json(p, i))
                    .collect()
            })
            .unwrap_or_default();

        let hearts = data
            .get("hearts")
            .and_then(Value::as_array)
            .map(|list| list.iter().map(HeartSpec::from_json).collect())
            .unwrap_or_default();

        Self {
            player: PlayerConfig::from_json(&player),
            goal: GoalConfig::from_json(&goal),
            platforms,
            hearts,
            bounds: Bounds {
                camera: rect(&bounds, "camera", d.bounds.camera),
                world: rect(&bounds, "world", d.bounds.world),
            },
            win_delay: millis(&meta, "winDelay", d.win_delay),
        }
    }

    /// Load the level `{dir}/{id}.json`, where `dir` comes from the
    /// `MEADOW_LEVEL_DIR` environment variable (default `levels`). A missing
    /// or unparseable file logs a warning and yields the full-default level.
    pub fn load(id: &str) -> Self {
        let dir = std::env::var("MEADOW_LEVEL_DIR").unwrap_or_else(|_| "levels".to_string());
        let path = format!("{dir}/{id}.json");
        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Value>(&content) {
                Ok(data) => Self::from_json(&data),
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using default level");
                    Self::default()
                },
            },
            Err(_) => {
                tracing::warn!("Level data '{id}' missing at {path}, using default level");
                Self::default()
            },
        }
    }
}
