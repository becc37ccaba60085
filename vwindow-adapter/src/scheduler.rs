/// Frame and debounce bookkeeping for the scroll controller.
///
/// There is no real display-refresh callback in a headless engine: the host calls
/// `tick(now_ms)` once per refresh (or from a fixed ~16ms timer), and this type records what the
/// next tick has to do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameScheduler {
    frame_pending: bool,
    debounce_deadline: Option<u64>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a frame. Returns `false` if one was already pending (the request coalesces).
    pub fn request_frame(&mut self) -> bool {
        !core::mem::replace(&mut self.frame_pending, true)
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Consumes the pending frame, if any.
    pub fn take_frame(&mut self) -> bool {
        core::mem::take(&mut self.frame_pending)
    }

    /// (Re)starts the debounce timer; an earlier deadline is replaced.
    pub fn arm_debounce(&mut self, now_ms: u64, delay_ms: u64) {
        self.debounce_deadline = Some(now_ms.saturating_add(delay_ms));
    }

    pub fn debounce_deadline(&self) -> Option<u64> {
        self.debounce_deadline
    }

    /// Consumes the debounce timer if it has expired at `now_ms`.
    pub fn take_due(&mut self, now_ms: u64) -> bool {
        match self.debounce_deadline {
            Some(deadline) if now_ms >= deadline => {
                self.debounce_deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_idle(&self) -> bool {
        !self.frame_pending && self.debounce_deadline.is_none()
    }

    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_coalesce_and_debounce_restarts() {
        let mut s = FrameScheduler::new();
        assert!(s.request_frame());
        assert!(!s.request_frame());
        assert!(s.take_frame());
        assert!(!s.take_frame());

        s.arm_debounce(100, 10);
        s.arm_debounce(105, 10);
        assert!(!s.take_due(110));
        assert!(s.take_due(115));
        assert!(s.is_idle());
    }
}
