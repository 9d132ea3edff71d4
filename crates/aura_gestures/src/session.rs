//! Per-gesture drag state

/// State of one touch interaction, from drag start until its settle ends.
///
/// The live value is always recomputed from `base + raw_offset`, never
/// accumulated, so replaying a sample cannot drift it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Travel range along the gesture axis, fixed for the whole session
    pub axis_extent: f32,
    /// Value before the session started (restored on cancel)
    pub origin: f32,
    /// Value the input is applied to
    pub base: f32,
    /// Cumulative, unclamped input since the session started
    pub raw_offset: f32,
    /// Projected live value
    pub clamped_progress: f32,
    /// Release velocity, set once at gesture end
    pub velocity: f32,
    /// Monotonic session number within the owning controller
    pub generation: u64,
}

impl DragSession {
    pub fn new(axis_extent: f32, origin: f32, base: f32, generation: u64) -> Self {
        Self {
            axis_extent,
            origin,
            base,
            raw_offset: 0.0,
            clamped_progress: base,
            velocity: 0.0,
            generation,
        }
    }

    /// Apply a cumulative input sample through `project`
    pub fn apply<F>(&mut self, raw_offset: f32, project: F) -> f32
    where
        F: FnOnce(f32, f32, f32) -> f32,
    {
        self.raw_offset = raw_offset;
        self.clamped_progress = project(self.base, raw_offset, self.axis_extent);
        self.clamped_progress
    }

    /// Progress normalized to `0.0..=1.0` (0 for an unmeasured axis)
    pub fn fraction(&self) -> f32 {
        if self.axis_extent > 0.0 {
            (self.clamped_progress / self.axis_extent).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clamp_project(base: f32, input: f32, extent: f32) -> f32 {
        (base + input).clamp(0.0, extent)
    }

    #[test]
    fn test_apply_is_not_cumulative() {
        let mut session = DragSession::new(300.0, 0.0, 0.0, 1);
        session.apply(120.0, clamp_project);
        session.apply(120.0, clamp_project);
        assert_eq!(session.clamped_progress, 120.0);
        assert_eq!(session.raw_offset, 120.0);
    }

    #[test]
    fn test_fraction() {
        let mut session = DragSession::new(200.0, 0.0, 50.0, 1);
        session.apply(50.0, clamp_project);
        assert_eq!(session.fraction(), 0.5);

        let unmeasured = DragSession::new(0.0, 0.0, 0.0, 2);
        assert_eq!(unmeasured.fraction(), 0.0);
    }
}
