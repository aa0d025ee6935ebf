// Running min/max over every height written during one generation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RangeTracker {
    bounds: Option<(f32, f32)>,
}

impl RangeTracker {
    pub fn new() -> Self {
        Self { bounds: None }
    }

    pub fn reset(&mut self) {
        self.bounds = None;
    }

    #[inline]
    pub fn observe(&mut self, value: f32) {
        self.bounds = Some(match self.bounds {
            None => (value, value),
            Some((lo, hi)) => (lo.min(value), hi.max(value)),
        });
    }

    pub fn min(&self) -> Option<f32> {
        self.bounds.map(|(lo, _)| lo)
    }

    pub fn max(&self) -> Option<f32> {
        self.bounds.map(|(_, hi)| hi)
    }

    // max - min, unset until something has been observed
    pub fn range(&self) -> Option<f32> {
        self.bounds.map(|(lo, hi)| hi - lo)
    }
}
