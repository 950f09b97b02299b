use crate::gfx::render_engine::ScreenPoint;

/// Identifies one pointer (mouse, finger, pen)
pub type PointerId = u32;

/// Pointer input queued by the host between ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down {
        pointer_id: PointerId,
        position: ScreenPoint,
    },
    Move {
        pointer_id: PointerId,
        position: ScreenPoint,
    },
    Up {
        pointer_id: PointerId,
    },
    /// Capture lost, window blurred or similar
    Cancel {
        pointer_id: PointerId,
    },
}

impl PointerEvent {
    pub fn pointer_id(&self) -> PointerId {
        match *self {
            Self::Down { pointer_id, .. }
            | Self::Move { pointer_id, .. }
            | Self::Up { pointer_id }
            | Self::Cancel { pointer_id } => pointer_id,
        }
    }
}
