//! Repeating timers and the loop controller that owns the game's tick timer.

use std::time::Duration;

/// Shortest tick the speed mapping will ever produce.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(20);
const BASE_TICK_MS: u64 = 300;
const MS_PER_SPEED_STEP: u64 = 12;

/// Upper bound on fires per timer in one `advance`, so a long frame hitch
/// does not replay a burst of ticks.
pub const MAX_CATCH_UP: u32 = 5;

/// Higher speed settings give shorter intervals, floored at `MIN_TICK_INTERVAL`.
pub fn tick_interval(speed: u32) -> Duration {
    let ms = BASE_TICK_MS.saturating_sub(MS_PER_SPEED_STEP.saturating_mul(speed as u64));
    Duration::from_millis(ms).max(MIN_TICK_INTERVAL)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

pub trait Scheduler {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle;
    /// Cancelling an unknown or already cancelled handle is a no-op.
    fn cancel(&mut self, handle: TimerHandle);
    fn is_active(&self, handle: TimerHandle) -> bool;
    /// Moves time forward and returns every fire, in firing order.
    fn advance(&mut self, elapsed: Duration) -> Vec<TimerHandle>;
}

#[derive(Debug, Clone)]
struct RepeatingTimer {
    handle: TimerHandle,
    interval: Duration,
    elapsed: Duration,
}

/// Scheduler pumped by the frame loop with each frame's elapsed time.
#[derive(Debug, Default, Clone)]
pub struct FrameScheduler {
    next_id: u64,
    timers: Vec<RepeatingTimer>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_count(&self) -> usize {
        self.timers.len()
    }
}

impl Scheduler for FrameScheduler {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push(RepeatingTimer {
            handle,
            interval: interval.max(Duration::from_millis(1)),
            elapsed: Duration::ZERO,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.handle != handle);
    }

    fn is_active(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    fn advance(&mut self, elapsed: Duration) -> Vec<TimerHandle> {
        let mut fired = Vec::new();
        for timer in &mut self.timers {
            timer.elapsed += elapsed;
            let mut fires = 0;
            while timer.elapsed >= timer.interval {
                timer.elapsed -= timer.interval;
                fires += 1;
                if fires == MAX_CATCH_UP {
                    timer.elapsed = Duration::ZERO;
                    break;
                }
            }
            fired.extend(std::iter::repeat_n(timer.handle, fires as usize));
        }
        fired
    }
}

/// Owns at most one armed tick timer.
#[derive(Debug, Default, Clone)]
pub struct LoopController {
    handle: Option<TimerHandle>,
    interval: Duration,
}

impl LoopController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a repeating timer, cancelling any previous one first.
    pub fn start<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S, interval: Duration) {
        self.stop(scheduler);
        self.interval = interval;
        self.handle = Some(scheduler.schedule_repeating(interval));
    }

    /// Idempotent.
    pub fn stop<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.handle.take() {
            scheduler.cancel(handle);
        }
    }

    /// Re-arms with the last interval.
    pub fn restart<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        let interval = self.interval;
        self.start(scheduler, interval);
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn owns(&self, handle: TimerHandle) -> bool {
        self.handle == Some(handle)
    }
}
