pub mod collision;
pub mod movement;
pub mod platforms;
pub mod win;

use serde::{Deserialize, Serialize};

use meadow_core::events::SimEvent;
use meadow_core::input::InputSnapshot;
use meadow_core::level::{GoalConfig, HeartSpec, LevelDefinition};
use meadow_core::scheduler::{Scheduler, TaskHandle};

use collision::Aabb;
use movement::PlayerState;
use platforms::{FloatMotion, Platform};
use win::WinGate;

/// Unscaled goal sprite footprint in pixels.
pub const GOAL_BASE_WIDTH: f32 = 40.0;
pub const GOAL_BASE_HEIGHT: f32 = 90.0;
/// Heart collider half extent (sprite half size at its fixed 1.5 scale).
pub const HEART_HALF_EXTENT: f32 = 12.0;
/// Display lifetime of the transient respawn notice.
pub const RESPAWN_NOTICE_SECS: f32 = 2.0;
/// Display window of the cosmetic collection burst.
pub const HEART_BURST_SECS: f32 = 0.5;

/// A collectible heart. Collection is terminal and irreversible: once
/// `collected` flips, the heart never participates in overlap tests again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Heart {
    pub x: f32,
    pub base_y: f32,
    pub y: f32,
    pub collected: bool,
    motion: Option<FloatMotion>,
}

impl Heart {
    pub fn from_spec(spec: &HeartSpec) -> Self {
        Self {
            x: spec.x,
            base_y: spec.y,
            y: spec.y,
            collected: false,
            // Heart floats start immediately, with no stagger.
            motion: spec.float.map(|f| FloatMotion::new(f, true)),
        }
    }

    pub fn advance(&mut self, dt: f32) {
        if let Some(motion) = &mut self.motion {
            self.y = self.base_y - motion.advance(dt);
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.x, self.y, HEART_HALF_EXTENT, HEART_HALF_EXTENT)
    }
}

/// Payloads for the session's one-shot scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wakeup {
    ArmWinGate,
    /// Start the float of the platform at this index.
    FloatStart(usize),
    RespawnNotice,
    HeartBurst,
}

fn goal_collider(goal: &GoalConfig) -> Aabb {
    let half_w = GOAL_BASE_WIDTH * goal.scale / 2.0;
    let half_h = GOAL_BASE_HEIGHT * goal.scale / 2.0;
    // Goal y is the feet position (bottom-anchored sprite).
    Aabb::new(goal.x, goal.y - half_h, half_w, half_h)
}

/// One running level instance.
///
/// The caller drives discrete ticks through [`LevelSession::update`]; all
/// entity mutation happens inside a tick in a fixed phase order, so collision
/// always sees every entity's current-tick position, including platforms that
/// moved this tick.
#[derive(Debug)]
pub struct LevelSession {
    level: LevelDefinition,
    player: PlayerState,
    platforms: Vec<Platform>,
    hearts: Vec<Heart>,
    goal: Aabb,
    win: WinGate,
    scheduler: Scheduler<Wakeup>,
    hearts_collected: u32,
    total_hearts: u32,
    /// Pending respawn-notice expiry, cancelled if a newer respawn replaces
    /// the notice before it expires.
    notice_task: Option<TaskHandle>,
}

impl LevelSession {
    pub fn new(level: LevelDefinition) -> Self {
        let platforms: Vec<Platform> = level.platforms.iter().map(Platform::from_spec).collect();
        let hearts: Vec<Heart> = level.hearts.iter().map(Heart::from_spec).collect();
        let total_hearts = hearts.len() as u32;

        let mut scheduler = Scheduler::new();
        scheduler.schedule_in(level.win_delay, Wakeup::ArmWinGate);
        for (index, spec) in level.platforms.iter().enumerate() {
            if spec.floats {
                scheduler.schedule_in(spec.float_delay, Wakeup::FloatStart(index));
            }
        }

        tracing::debug!(
            platforms = platforms.len(),
            hearts = total_hearts,
            win_delay = level.win_delay,
            "level session created"
        );

        Self {
            player: PlayerState::new(level.player.start),
            goal: goal_collider(&level.goal),
            platforms,
            hearts,
            win: WinGate::new(),
            scheduler,
            hearts_collected: 0,
            total_hearts,
            notice_task: None,
            level,
        }
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn hearts(&self) -> &[Heart] {
        &self.hearts
    }

    pub fn goal(&self) -> Aabb {
        self.goal
    }

    pub fn level(&self) -> &LevelDefinition {
        &self.level
    }

    pub fn hearts_collected(&self) -> u32 {
        self.hearts_collected
    }

    pub fn total_hearts(&self) -> u32 {
        self.total_hearts
    }

    /// Accumulated simulation time in seconds.
    pub fn clock(&self) -> f32 {
        self.scheduler.now()
    }

    pub fn is_complete(&self) -> bool {
        self.win.completed
    }

    fn player_half_extents(&self) -> (f32, f32) {
        let cfg = &self.level.player;
        (
            cfg.body.width * cfg.scale / 2.0,
            cfg.body.height * cfg.scale / 2.0,
        )
    }

    /// Advance the simulation by `dt` seconds with this tick's input.
    /// Returns the notifications produced during the tick. A completed
    /// session ignores further updates.
    pub fn update(&mut self, dt: f32, input: &InputSnapshot) -> Vec<SimEvent> {
        if self.win.completed {
            return Vec::new();
        }

        let mut events = Vec::new();

        // Due wakeups first, so an arm or float-start scheduled for this
        // instant takes effect before anything moves.
        for wakeup in self.scheduler.advance(dt) {
            match wakeup {
                Wakeup::ArmWinGate => self.win.arm(self.scheduler.now()),
                Wakeup::FloatStart(index) => {
                    if let Some(platform) = self.platforms.get_mut(index) {
                        platform.start_float();
                    }
                },
                Wakeup::RespawnNotice => {
                    self.notice_task = None;
                    events.push(SimEvent::RespawnNoticeExpired);
                },
                Wakeup::HeartBurst => events.push(SimEvent::HeartBurstExpired),
            }
        }

        // Operator inputs outrank the movement state machine.
        if input.reset_pressed {
            self.player.teleport(self.level.player.respawn);
        }
        if input.force_jump_pressed {
            self.player.vx = 0.0;
            self.player.vy = self.level.player.jump_velocity;
        }

        // Movement integration against a fresh touching-ground query.
        let (half_w, half_h) = self.player_half_extents();
        let grounded = collision::touching_ground(&self.player, half_w, half_h, &self.platforms);
        let prev_locomotion = self.player.locomotion;
        movement::step(&mut self.player, input, &self.level.player, grounded, dt);

        // Kinematics: platforms and hearts move to their current-tick
        // positions before any collision is evaluated.
        for platform in &mut self.platforms {
            platform.advance(dt);
        }
        for heart in &mut self.hearts {
            heart.advance(dt);
        }

        // Solid resolution.
        self.player.grounded = collision::resolve_solid(&mut self.player, half_w, half_h, &self.platforms);

        let body = Aabb::new(self.player.x, self.player.y, half_w, half_h);

        // Goal trigger, gated by the win latch and travel distance.
        if body.overlaps(&self.goal)
            && self
                .win
                .try_complete(self.level.player.start, self.player.x, self.player.y)
        {
            events.push(SimEvent::LevelComplete {
                hearts_collected: self.hearts_collected,
                total_hearts: self.total_hearts,
            });
        }

        // Pickup triggers. The collected flag is checked before every overlap
        // test, so a destroyed heart can never source a second collection.
        for heart in &mut self.hearts {
            if heart.collected || !body.overlaps(&heart.aabb()) {
                continue;
            }
            heart.collected = true;
            self.hearts_collected += 1;
            events.push(SimEvent::HeartCollected {
                collected: self.hearts_collected,
                total: self.total_hearts,
            });
            events.push(SimEvent::HeartBurst {
                x: heart.x,
                y: heart.y,
            });
            self.scheduler.schedule_in(HEART_BURST_SECS, Wakeup::HeartBurst);
        }

        // Fall respawn, after all spatial resolution for the tick.
        if movement::fell_out(&self.player, &self.level.bounds.world) {
            self.player.teleport(self.level.player.respawn);
            events.push(SimEvent::Respawned {
                x: self.player.x,
                y: self.player.y,
            });
            // A newer notice replaces a pending one.
            if let Some(task) = self.notice_task.take() {
                self.scheduler.cancel(task);
            }
            self.notice_task = Some(
                self.scheduler
                    .schedule_in(RESPAWN_NOTICE_SECS, Wakeup::RespawnNotice),
            );
        }

        if self.player.locomotion != prev_locomotion {
            events.push(SimEvent::LocomotionChanged(self.player.locomotion));
        }

        events
    }
}
