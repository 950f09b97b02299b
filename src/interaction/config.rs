/// Tunables for the [`InteractionController`](super::InteractionController)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionConfig {
    /// Entities closer to the eye than this (along the view axis) cannot be
    /// grabbed; dragging them would unproject onto a degenerate plane
    pub min_drag_depth: f32,
    /// Upper bound on simultaneous drag sessions
    pub max_pointers: usize,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            min_drag_depth: 1e-3,
            max_pointers: 10,
        }
    }
}

impl InteractionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: Set the nearest grabbable depth
    pub fn with_min_drag_depth(mut self, depth: f32) -> Self {
        self.min_drag_depth = depth.max(0.0);
        self
    }

    /// Builder pattern: Set the drag session cap
    pub fn with_max_pointers(mut self, max_pointers: usize) -> Self {
        self.max_pointers = max_pointers.max(1);
        self
    }
}
