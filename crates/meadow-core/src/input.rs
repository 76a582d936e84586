use serde::{Deserialize, Serialize};

/// Raw held state of the controls for one frame, as reported by the input
/// source. Level-triggered: true for as long as the key is down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlsHeld {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Emergency reset (teleport to respawn).
    pub reset: bool,
    /// Debug force-jump.
    pub force_jump: bool,
}

/// Per-tick input snapshot consumed by the simulation.
///
/// `*_pressed` flags are edge-triggered: true only on the tick the control
/// transitioned from released to held. Directions stay level-triggered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub left_held: bool,
    pub right_held: bool,
    pub up_pressed: bool,
    pub down_pressed: bool,
    pub reset_pressed: bool,
    pub force_jump_pressed: bool,
}

/// Converts raw held state into edge-triggered snapshots by remembering the
/// previous frame.
#[derive(Debug, Default)]
pub struct InputTracker {
    prev: ControlsHeld,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&mut self, held: ControlsHeld) -> InputSnapshot {
        let snap = InputSnapshot {
            left_held: held.left,
            right_held: held.right,
            up_pressed: held.up && !self.prev.up,
            down_pressed: held.down && !self.prev.down,
            reset_pressed: held.reset && !self.prev.reset,
            force_jump_pressed: held.force_jump && !self.prev.force_jump,
        };
        self.prev = held;
        snap
    }
}
