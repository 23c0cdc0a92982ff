/// Terminal size change tracking

/// Last-observed terminal dimensions in character cells.
///
/// Starts with no measurement, so the first `update` always reports a
/// change. The OS size query itself lives with the caller; on a failed
/// query the caller simply skips the update and the stale size stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    size: Option<(u16, u16)>,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a measurement, returning whether it differs from the last one
    pub fn update(&mut self, width: u16, height: u16) -> bool {
        let changed = self.size != Some((width, height));
        self.size = Some((width, height));
        changed
    }

    /// The most recent measurement, if any
    #[inline]
    pub fn size(&self) -> Option<(u16, u16)> {
        self.size
    }
}
