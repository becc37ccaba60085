use alloc::vec::Vec;

use vwindow::WindowRange;

use crate::Error;

#[derive(Debug)]
struct RenderPass<N> {
    generation: u64,
    range: WindowRange,
    next: usize,
    fragment: Vec<N>,
}

/// Outcome of one [`BatchRenderer::step`].
#[derive(Debug)]
pub enum BatchStep<N> {
    /// No pass in flight.
    Idle,
    /// One batch was appended to the off-surface fragment.
    Progress { rendered: usize, total: usize },
    /// The pass finished; its fragment is ready to be committed in one operation.
    Done { range: WindowRange, nodes: Vec<N> },
    /// The pass was superseded by a newer generation and dropped without committing.
    Discarded,
}

/// Materializes a window in fixed-size batches, one batch per frame.
///
/// At most one pass is in flight. Requests arriving mid-pass collapse into a single follow-up
/// pass (`take_rerun`). Each pass is tagged with the generation current at its start;
/// [`Self::invalidate`] bumps the generation so a pass started for an older collection is
/// dropped at its next step instead of being committed.
#[derive(Debug)]
pub struct BatchRenderer<N> {
    batch_size: usize,
    generation: u64,
    pass: Option<RenderPass<N>>,
    rerun: bool,
}

impl<N> BatchRenderer<N> {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            generation: 0,
            pass: None,
            rerun: false,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn invalidate(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        vdebug!(generation = self.generation, "BatchRenderer::invalidate");
        self.generation
    }

    pub fn is_busy(&self) -> bool {
        self.pass.is_some()
    }

    /// The window of the pass in flight.
    pub fn in_flight(&self) -> Option<WindowRange> {
        self.pass.as_ref().map(|p| p.range)
    }

    pub fn queue_rerun(&mut self) {
        self.rerun = true;
    }

    pub fn take_rerun(&mut self) -> bool {
        core::mem::take(&mut self.rerun)
    }

    pub fn start(&mut self, range: WindowRange) {
        debug_assert!(self.pass.is_none(), "a render pass is already in flight");
        vtrace!(
            start = range.start_index,
            end = range.end_index,
            generation = self.generation,
            "BatchRenderer::start"
        );
        self.pass = Some(RenderPass {
            generation: self.generation,
            range,
            next: range.start_index,
            fragment: Vec::with_capacity(range.len()),
        });
    }

    /// Renders the next batch in index order.
    ///
    /// A render failure drops the whole pass (no partial commit) and is returned as-is.
    pub fn step(
        &mut self,
        mut render: impl FnMut(usize) -> Result<N, Error>,
    ) -> Result<BatchStep<N>, Error> {
        let Some(pass) = self.pass.as_mut() else {
            return Ok(BatchStep::Idle);
        };

        if pass.generation != self.generation {
            vwarn!(
                pass_generation = pass.generation,
                generation = self.generation,
                "discarding stale render pass"
            );
            self.pass = None;
            return Ok(BatchStep::Discarded);
        }

        let end = pass
            .next
            .saturating_add(self.batch_size)
            .min(pass.range.end_index);
        for index in pass.next..end {
            match render(index) {
                Ok(node) => pass.fragment.push(node),
                Err(err) => {
                    self.pass = None;
                    self.rerun = false;
                    return Err(err);
                }
            }
        }
        pass.next = end;

        if pass.next < pass.range.end_index {
            return Ok(BatchStep::Progress {
                rendered: pass.fragment.len(),
                total: pass.range.len(),
            });
        }

        match self.pass.take() {
            Some(done) => Ok(BatchStep::Done {
                range: done.range,
                nodes: done.fragment,
            }),
            None => Ok(BatchStep::Idle),
        }
    }

    /// Drops any pass in flight and any queued follow-up.
    pub fn cancel(&mut self) {
        self.pass = None;
        self.rerun = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::boxed::Box;

    #[test]
    fn renders_one_batch_per_step_in_index_order() {
        let mut b = BatchRenderer::new(4);
        b.start(WindowRange::new(3, 13));

        let mut seen = Vec::new();
        let mut render = |i: usize| -> Result<usize, Error> {
            seen.push(i);
            Ok(i * 10)
        };
        assert!(matches!(
            b.step(&mut render).unwrap(),
            BatchStep::Progress { rendered: 4, total: 10 }
        ));
        assert!(matches!(
            b.step(&mut render).unwrap(),
            BatchStep::Progress { rendered: 8, total: 10 }
        ));
        match b.step(&mut render).unwrap() {
            BatchStep::Done { range, nodes } => {
                assert_eq!(range, WindowRange::new(3, 13));
                assert_eq!(nodes, (3..13).map(|i| i * 10).collect::<Vec<_>>());
            }
            other => panic!("unexpected step: {other:?}"),
        }
        assert!(!b.is_busy());
        assert_eq!(seen, (3..13).collect::<Vec<_>>());
    }

    #[test]
    fn stale_generation_is_discarded() {
        let mut b = BatchRenderer::<u8>::new(2);
        b.start(WindowRange::new(0, 10));
        b.step(|_| Ok(0)).unwrap();
        b.invalidate();
        b.queue_rerun();
        assert!(matches!(b.step(|_| Ok(0)).unwrap(), BatchStep::Discarded));
        assert!(!b.is_busy());
        assert!(b.take_rerun());
    }

    #[test]
    fn render_error_drops_the_pass() {
        let mut b = BatchRenderer::<u8>::new(5);
        b.start(WindowRange::new(0, 5));
        let err = b
            .step(|i| {
                if i == 3 {
                    Err(Error::Render {
                        index: i,
                        source: Box::from("boom"),
                    })
                } else {
                    Ok(0)
                }
            })
            .unwrap_err();
        assert!(matches!(err, Error::Render { index: 3, .. }));
        assert!(!b.is_busy());
        assert!(matches!(b.step(|_| Ok(0)).unwrap(), BatchStep::Idle));
    }
}
