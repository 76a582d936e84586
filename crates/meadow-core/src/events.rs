use serde::{Deserialize, Serialize};

/// Player locomotion state, reported to the animation layer on transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locomotion {
    Idle,
    Walking,
    Airborne,
}

/// Notifications emitted by the simulation during a tick.
///
/// HUD, animation, and level-complete consumers drain these from the tick's
/// return value; none of them feed back into the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A heart was collected. Carries the running tally for the HUD.
    HeartCollected { collected: u32, total: u32 },
    /// Cosmetic burst at the collection point. No gameplay effect.
    HeartBurst { x: f32, y: f32 },
    /// The burst's fixed display window elapsed.
    HeartBurstExpired,
    /// The player fell out of the world and was moved to the respawn point.
    Respawned { x: f32, y: f32 },
    /// The transient respawn notice's display lifetime elapsed.
    RespawnNoticeExpired,
    LocomotionChanged(Locomotion),
    /// Terminal payload for the level-complete consumer. Emitted at most once
    /// per level instance.
    LevelComplete {
        hearts_collected: u32,
        total_hearts: u32,
    },
}
