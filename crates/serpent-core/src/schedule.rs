//! One-shot frame scheduling.
//!
//! Hosts expose a `request -> handle` / `cancel(handle)` primitive that
//! fires once (`requestAnimationFrame` in the browser). [`FrameLoop`] keeps
//! exactly one request outstanding while running, re-arms after each tick,
//! and on stop cancels the last handle it was given so nothing fires after
//! teardown.

pub trait Schedule {
    type Handle: Copy + PartialEq + std::fmt::Debug;

    fn request(&mut self) -> Option<Self::Handle>;
    fn cancel(&mut self, handle: Self::Handle);
}

#[derive(Debug)]
pub struct FrameLoop<H> {
    pending: Option<H>,
    running: bool,
    frames: u64,
}

impl<H> Default for FrameLoop<H> {
    fn default() -> Self {
        Self {
            pending: None,
            running: false,
            frames: 0,
        }
    }
}

impl<H: Copy + PartialEq + std::fmt::Debug> FrameLoop<H> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn pending(&self) -> Option<H> {
        self.pending
    }

    /// Number of ticks run since start.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn start<S: Schedule<Handle = H>>(&mut self, sched: &mut S) {
        if self.running {
            return;
        }
        self.running = true;
        self.pending = sched.request();
        if self.pending.is_none() {
            log::warn!("[frame] scheduler refused the first request");
            self.running = false;
        }
    }

    /// Handle a fired callback. Runs `tick` and re-arms only if `handle` is
    /// the outstanding request of a running loop; stale or post-stop
    /// callbacks are ignored. Returns whether `tick` ran.
    pub fn fire<S, F>(&mut self, sched: &mut S, handle: H, tick: F) -> bool
    where
        S: Schedule<Handle = H>,
        F: FnOnce(),
    {
        if !self.running || self.pending != Some(handle) {
            return false;
        }
        self.pending = None;
        tick();
        self.frames += 1;
        self.pending = sched.request();
        if self.pending.is_none() {
            log::warn!("[frame] scheduler refused a request; loop stopped");
            self.running = false;
        }
        true
    }

    pub fn stop<S: Schedule<Handle = H>>(&mut self, sched: &mut S) {
        self.running = false;
        if let Some(h) = self.pending.take() {
            sched.cancel(h);
        }
    }
}

/// Scheduler driven by hand, for tests and headless hosts.
#[derive(Debug, Default)]
pub struct ManualSchedule {
    next: u32,
    queued: Vec<u32>,
    cancelled: Vec<u32>,
}

impl ManualSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests not yet fired or cancelled.
    pub fn queued(&self) -> &[u32] {
        &self.queued
    }

    pub fn cancelled(&self) -> &[u32] {
        &self.cancelled
    }

    /// Pop the oldest queued request, as the host would when firing it.
    pub fn pop(&mut self) -> Option<u32> {
        if self.queued.is_empty() {
            None
        } else {
            Some(self.queued.remove(0))
        }
    }
}

impl Schedule for ManualSchedule {
    type Handle = u32;

    fn request(&mut self) -> Option<u32> {
        self.next += 1;
        self.queued.push(self.next);
        Some(self.next)
    }

    fn cancel(&mut self, handle: u32) {
        self.queued.retain(|h| *h != handle);
        self.cancelled.push(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rearms_after_each_tick() {
        let mut sched = ManualSchedule::new();
        let mut lp = FrameLoop::new();
        lp.start(&mut sched);
        let mut ticks = 0;
        for _ in 0..3 {
            let h = sched.pop().unwrap();
            assert!(lp.fire(&mut sched, h, || ticks += 1));
        }
        assert_eq!(ticks, 3);
        assert_eq!(sched.queued().len(), 1);
    }

    #[test]
    fn stop_cancels_last_request() {
        let mut sched = ManualSchedule::new();
        let mut lp = FrameLoop::new();
        lp.start(&mut sched);
        let h = sched.pop().unwrap();
        lp.fire(&mut sched, h, || {});
        let last = lp.pending().unwrap();
        lp.stop(&mut sched);
        assert_eq!(sched.cancelled(), &[last]);
        assert!(sched.queued().is_empty());
        assert!(!lp.fire(&mut sched, last, || panic!("fired after stop")));
    }
}
