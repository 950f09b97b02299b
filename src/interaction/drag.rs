use std::collections::HashMap;

use cgmath::Vector3;

use super::events::PointerId;
use crate::gfx::scene::EntityId;

/// An in-progress drag gesture for one pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub pointer_id: PointerId,
    pub target: EntityId,
    /// World-space vector from the entity origin to the grabbed point,
    /// fixed for the whole session
    pub grab_offset: Vector3<f32>,
    /// View depth of the drag plane, fixed for the whole session
    pub depth: f32,
    pub active: bool,
}

impl DragSession {
    /// Where the entity origin goes when the grabbed point is at `pointer_world`
    pub fn target_position(&self, pointer_world: Vector3<f32>) -> Vector3<f32> {
        pointer_world - self.grab_offset
    }
}

/// State of one pointer's drag state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging(DragSession),
}

/// Drag sessions keyed by pointer; a missing entry means `Idle`
#[derive(Debug, Default)]
pub struct DragTracker {
    sessions: HashMap<PointerId, DragSession>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, pointer_id: PointerId) -> DragState {
        match self.sessions.get(&pointer_id) {
            Some(session) => DragState::Dragging(*session),
            None => DragState::Idle,
        }
    }

    pub fn session(&self, pointer_id: PointerId) -> Option<&DragSession> {
        self.sessions.get(&pointer_id)
    }

    pub fn is_dragging(&self, pointer_id: PointerId) -> bool {
        self.sessions.contains_key(&pointer_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Starts a session; returns false if the pointer is already dragging
    pub fn begin(&mut self, session: DragSession) -> bool {
        if self.sessions.contains_key(&session.pointer_id) {
            return false;
        }
        self.sessions.insert(session.pointer_id, session);
        true
    }

    /// Ends the pointer's session, if any
    pub fn end(&mut self, pointer_id: PointerId) -> Option<DragSession> {
        self.sessions.remove(&pointer_id).map(|mut session| {
            session.active = false;
            session
        })
    }

    /// Every dragging pointer, ascending
    pub fn pointers(&self) -> Vec<PointerId> {
        let mut pointers: Vec<PointerId> = self.sessions.keys().copied().collect();
        pointers.sort();
        pointers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Zero;

    fn session(pointer_id: PointerId, target: u64) -> DragSession {
        DragSession {
            pointer_id,
            target: EntityId(target),
            grab_offset: Vector3::zero(),
            depth: 10.0,
            active: true,
        }
    }

    #[test]
    fn test_one_session_per_pointer() {
        let mut tracker = DragTracker::new();
        assert_eq!(tracker.state(1), DragState::Idle);

        assert!(tracker.begin(session(1, 0)));
        assert!(!tracker.begin(session(1, 5)));
        assert_eq!(tracker.session(1).unwrap().target, EntityId(0));

        assert!(tracker.begin(session(2, 5)));
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_end_returns_inactive_session() {
        let mut tracker = DragTracker::new();
        tracker.begin(session(3, 1));
        let ended = tracker.end(3).unwrap();
        assert!(!ended.active);
        assert!(tracker.end(3).is_none());
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_pointers_are_listed_in_order() {
        let mut tracker = DragTracker::new();
        tracker.begin(session(7, 1));
        tracker.begin(session(2, 1));
        assert_eq!(tracker.pointers(), vec![2, 7]);

        tracker.end(2);
        assert_eq!(tracker.pointers(), vec![7]);
    }

    #[test]
    fn test_target_position_subtracts_offset() {
        let mut s = session(1, 1);
        s.grab_offset = Vector3::new(0.5, 0.0, 0.0);
        assert_eq!(s.target_position(Vector3::new(2.0, 1.0, 0.0)), Vector3::new(1.5, 1.0, 0.0));
    }
}
