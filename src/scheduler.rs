//! Play/pause state machine driving throttled simulation steps.

/// Identity of one scheduled frame callback, minted by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Whatever delivers frame callbacks: the window in production, a manual
/// fixture in tests. At most one callback is outstanding at a time.
pub trait FrameHost {
    /// Request one frame callback; returns its handle.
    fn schedule(&mut self) -> FrameHandle;

    /// Retract an outstanding request. Hosts that cannot retract may
    /// still deliver the callback; the scheduler ignores it while paused.
    fn cancel(&mut self, handle: FrameHandle);
}

/// Animation state machine: paused or running, with a skip-factor
/// throttle.
///
/// The running flag is the pending handle itself: the scheduler is paused
/// exactly when no callback is outstanding.
pub struct Scheduler {
    pending: Option<FrameHandle>,
    frame_num: u32,
    skip: u32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            pending: None,
            frame_num: 0,
            skip: 1,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.pending.is_none()
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn skip_factor(&self) -> u32 {
        self.skip
    }

    /// Update the throttle. The frame counter is deliberately not reset:
    /// it continues modulo whatever factor is current when the next
    /// callback is evaluated.
    pub fn set_skip_factor(&mut self, skip: u32) {
        self.skip = skip.max(1);
    }

    /// `PAUSED -> RUNNING`: schedule the next callback. A no-op while
    /// already running; a second concurrent callback chain must never
    /// exist.
    pub fn play(&mut self, host: &mut dyn FrameHost) {
        if self.pending.is_some() {
            return;
        }
        self.pending = Some(host.schedule());
        log::info!("playback resumed");
    }

    /// `RUNNING -> PAUSED`: cancel the pending callback and clear the
    /// handle. Idempotent.
    pub fn pause(&mut self, host: &mut dyn FrameHost) {
        if let Some(handle) = self.pending.take() {
            host.cancel(handle);
            log::info!("playback paused");
        }
    }

    /// One delivered frame callback. Returns true when this callback
    /// crosses the throttle boundary and the simulation must advance
    /// (tick then draw). Advances the counter and reschedules regardless
    /// of whether the tick fires.
    ///
    /// A callback delivered while paused does nothing: no tick, no
    /// reschedule.
    pub fn on_frame(&mut self, host: &mut dyn FrameHost) -> bool {
        if self.pending.is_none() {
            return false;
        }
        let fire = self.frame_num % self.skip == 0;
        self.frame_num = (self.frame_num + 1) % self.skip;
        self.pending = Some(host.schedule());
        fire
    }
}
