/// An engine-driven smooth scroll, advanced once per tick.
///
/// The start time is taken from the first tick that samples it, so a tween can be requested
/// from code that has no clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTween {
    pub from: u64,
    pub to: u64,
    pub duration_ms: u64,
    pub easing: Easing,
    start_ms: Option<u64>,
    last_applied: Option<u64>,
}

impl ScrollTween {
    pub fn new(from: u64, to: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(1),
            easing,
            start_ms: None,
            last_applied: None,
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        self.start_ms
            .is_some_and(|start| now_ms.saturating_sub(start) >= self.duration_ms)
    }

    /// Samples the offset at `now_ms` and remembers it as the last applied offset.
    pub fn advance(&mut self, now_ms: u64) -> u64 {
        let start = *self.start_ms.get_or_insert(now_ms);
        let elapsed = now_ms.saturating_sub(start);
        let t = (elapsed as f64 / self.duration_ms as f64).clamp(0.0, 1.0);
        let eased = self.easing.sample(t);

        let from = self.from as f64;
        let to = self.to as f64;
        let offset = if t >= 1.0 {
            self.to
        } else {
            ((from + (to - from) * eased).max(0.0) + 0.5) as u64
        };
        self.last_applied = Some(offset);
        offset
    }

    /// Whether `offset` is the echo of this tween's own last write rather than a user scroll.
    pub fn is_own_echo(&self, offset: u64) -> bool {
        self.last_applied == Some(offset)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    SmoothStep,
    #[default]
    EaseInOutCubic,
}

impl Easing {
    pub fn sample(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_starts_on_first_sample_and_lands_on_target() {
        let mut t = ScrollTween::new(0, 1000, 100, Easing::SmoothStep);
        assert!(!t.is_done(500));
        assert_eq!(t.advance(500), 0);

        let mut last = 0;
        for now in [510u64, 540, 580, 599] {
            let off = t.advance(now);
            assert!(off >= last);
            last = off;
        }
        assert!(t.is_done(600));
        assert_eq!(t.advance(600), 1000);
        assert!(t.is_own_echo(1000));
        assert!(!t.is_own_echo(999));
    }
}
