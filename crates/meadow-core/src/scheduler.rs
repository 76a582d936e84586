/// Handle identifying a pending wakeup, used for cancellation.
pub type TaskHandle = u64;

#[derive(Debug)]
struct Task<T> {
    handle: TaskHandle,
    fire_at: f32,
    payload: T,
}

/// One-shot wakeups keyed by simulation time.
///
/// Time advances only through [`Scheduler::advance`], so firing is a function
/// of accumulated deltas, never of wall-clock time. Each task fires at most
/// once; cancellation removes a task before it fires so a wakeup never runs
/// against state its owner has already torn down.
#[derive(Debug)]
pub struct Scheduler<T> {
    now: f32,
    next_handle: TaskHandle,
    tasks: Vec<Task<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_handle: 1,
            tasks: Vec::new(),
        }
    }

    /// Accumulated simulation time in seconds.
    pub fn now(&self) -> f32 {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Schedule `payload` to fire `delay` seconds from now. Negative delays
    /// are clamped to fire on the next advance.
    pub fn schedule_in(&mut self, delay: f32, payload: T) -> TaskHandle {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.tasks.push(Task {
            handle,
            fire_at: self.now + delay.max(0.0),
            payload,
        });
        handle
    }

    /// Cancel a pending wakeup. Returns false when it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.handle != handle);
        self.tasks.len() != before
    }

    /// Advance simulation time by `dt` and drain every wakeup that has come
    /// due, ordered by fire time (ties by scheduling order).
    pub fn advance(&mut self, dt: f32) -> Vec<T> {
        self.now += dt;
        let now = self.now;

        let mut due = Vec::new();
        let mut i = 0;
        while i < self.tasks.len() {
            if self.tasks[i].fire_at <= now {
                due.push(self.tasks.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| {
            a.fire_at
                .partial_cmp(&b.fire_at)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.handle.cmp(&b.handle))
        });
        due.into_iter().map(|t| t.payload).collect()
    }
}
