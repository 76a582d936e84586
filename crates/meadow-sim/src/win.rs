use serde::{Deserialize, Serialize};

use meadow_core::level::Point;

/// Minimum straight-line distance from the player start before a goal overlap
/// may win. Blocks trivial wins from spawn proximity or a teleport onto the
/// goal.
pub const MIN_TRAVEL_DISTANCE: f32 = 200.0;

/// One-shot time-delayed latch plus travel-distance check gating the goal
/// trigger.
///
/// `can_win` flips false to true exactly once when the gate arms, and
/// `completed` latches permanently on the first accepted win.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WinGate {
    /// Simulation time at which the gate armed.
    pub armed_at: Option<f32>,
    pub can_win: bool,
    pub completed: bool,
}

impl WinGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the gate. Later calls are no-ops; the transition happens once.
    pub fn arm(&mut self, now: f32) {
        if !self.can_win {
            self.can_win = true;
            self.armed_at = Some(now);
        }
    }

    /// Evaluate a goal overlap at the player's current position. Returns true
    /// exactly once: when the gate is armed, the level is not yet complete,
    /// and the player has travelled at least [`MIN_TRAVEL_DISTANCE`] from
    /// `start`.
    pub fn try_complete(&mut self, start: Point, x: f32, y: f32) -> bool {
        if !self.can_win || self.completed {
            return false;
        }
        let dx = x - start.x;
        let dy = y - start.y;
        if (dx * dx + dy * dy).sqrt() < MIN_TRAVEL_DISTANCE {
            return false;
        }
        self.completed = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: Point = Point::new(0.0, 0.0);

    #[test]
    fn unarmed_gate_never_wins() {
        let mut gate = WinGate::new();
        assert!(!gate.try_complete(START, 1000.0, 0.0));
        assert!(!gate.completed);
    }

    #[test]
    fn arming_is_one_shot_and_monotone() {
        let mut gate = WinGate::new();
        gate.arm(3.0);
        assert!(gate.can_win);
        assert_eq!(gate.armed_at, Some(3.0));

        gate.arm(99.0);
        assert_eq!(gate.armed_at, Some(3.0), "re-arming must not move armed_at");
        assert!(gate.can_win, "can_win never reverts");
    }

    #[test]
    fn distance_gate_boundary() {
        let mut gate = WinGate::new();
        gate.arm(0.0);

        assert!(
            !gate.try_complete(START, 199.999, 0.0),
            "just under the travel threshold"
        );
        assert!(!gate.completed);

        assert!(
            gate.try_complete(START, 200.001, 0.0),
            "just over the travel threshold"
        );
        assert!(gate.completed);
    }

    #[test]
    fn distance_is_euclidean() {
        let mut gate = WinGate::new();
        gate.arm(0.0);
        // 3-4-5 triangle scaled: (150, 200) is 250 away.
        assert!(gate.try_complete(START, 150.0, 200.0));
    }

    #[test]
    fn completion_fires_at_most_once_under_sustained_overlap() {
        let mut gate = WinGate::new();
        gate.arm(0.0);

        assert!(gate.try_complete(START, 500.0, 0.0));
        for _ in 0..10 {
            assert!(
                !gate.try_complete(START, 500.0, 0.0),
                "persistent overlap must not re-fire the win"
            );
        }
    }
}
