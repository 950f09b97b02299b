use std::collections::VecDeque;

use log::{debug, info, trace, warn};

use super::{
    config::InteractionConfig,
    drag::{DragSession, DragState, DragTracker},
    events::{PointerEvent, PointerId},
    reaction::{EffectContext, ReactionRule, RuleId},
};
use crate::{
    error::EffectError,
    gfx::{
        camera::CameraView,
        picking::{is_finite_vec, ObjectPicker, PickResult},
        render_engine::{RenderEngine, ScreenPoint},
        scene::{EntityId, Scene},
    },
};

/// Outcome of one pointer-down
#[derive(Debug, Clone)]
pub struct PointerPick {
    pub pointer_id: PointerId,
    pub position: ScreenPoint,
    pub hit: Option<PickResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEndReason {
    Released,
    Cancelled,
    TargetRemoved,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEnd {
    pub session: DragSession,
    pub reason: DragEndReason,
}

/// Everything that happened during one [`InteractionController::tick`]
#[derive(Debug, Default)]
pub struct TickReport {
    pub frame: u64,
    pub picks: Vec<PointerPick>,
    pub drags_started: Vec<DragSession>,
    pub drags_ended: Vec<DragEnd>,
    /// Names of rules whose effect ran successfully, in evaluation order
    pub fired: Vec<String>,
    pub failures: Vec<EffectError>,
}

impl TickReport {
    fn new(frame: u64) -> Self {
        Self {
            frame,
            ..Default::default()
        }
    }

    pub fn has_fired(&self, rule: &str) -> bool {
        self.fired.iter().any(|name| name == rule)
    }

    pub fn picked_entities(&self) -> Vec<EntityId> {
        self.picks
            .iter()
            .filter_map(|pick| pick.hit.as_ref().map(|hit| hit.entity))
            .collect()
    }
}

/// Turns pointer input into picks, drags and rule firings
///
/// Pointer callbacks only queue events. Nothing touches the scene until
/// [`tick`](Self::tick) drains the queue, so the host can feed input from
/// any point in its frame.
pub struct InteractionController<E: RenderEngine> {
    scene: Scene,
    engine: E,
    config: InteractionConfig,
    picker: ObjectPicker,
    drags: DragTracker,
    queue: VecDeque<PointerEvent>,
    rules: Vec<ReactionRule>,
}

impl<E: RenderEngine> InteractionController<E> {
    pub fn new(scene: Scene, engine: E) -> Self {
        Self::with_config(scene, engine, InteractionConfig::default())
    }

    pub fn with_config(scene: Scene, engine: E, config: InteractionConfig) -> Self {
        Self {
            scene,
            engine,
            config,
            picker: ObjectPicker::new(),
            drags: DragTracker::new(),
            queue: VecDeque::new(),
            rules: Vec::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn into_parts(self) -> (Scene, E) {
        (self.scene, self.engine)
    }

    pub fn on_pointer_down(&mut self, pointer_id: PointerId, x: f32, y: f32) {
        self.push_event(PointerEvent::Down {
            pointer_id,
            position: ScreenPoint::new(x, y),
        });
    }

    pub fn on_pointer_move(&mut self, pointer_id: PointerId, x: f32, y: f32) {
        self.push_event(PointerEvent::Move {
            pointer_id,
            position: ScreenPoint::new(x, y),
        });
    }

    pub fn on_pointer_up(&mut self, pointer_id: PointerId) {
        self.push_event(PointerEvent::Up { pointer_id });
    }

    pub fn on_pointer_cancel(&mut self, pointer_id: PointerId) {
        self.push_event(PointerEvent::Cancel { pointer_id });
    }

    /// Queues a cancel for every dragging pointer, e.g. on window blur
    pub fn cancel_all(&mut self) {
        let mut pointers: Vec<PointerId> = self
            .queue
            .iter()
            .map(PointerEvent::pointer_id)
            .chain(self.drags.pointers())
            .collect();
        pointers.sort_unstable();
        pointers.dedup();
        for pointer_id in pointers {
            self.push_event(PointerEvent::Cancel { pointer_id });
        }
    }

    pub fn push_event(&mut self, event: PointerEvent) {
        self.queue.push_back(event);
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    pub fn drag_state(&self, pointer_id: PointerId) -> DragState {
        self.drags.state(pointer_id)
    }

    pub fn active_drags(&self) -> usize {
        self.drags.len()
    }

    /// Adds a rule; rules are evaluated in registration order
    pub fn register_reaction_rule(&mut self, rule: ReactionRule) -> RuleId {
        debug!(
            "Registered reaction rule '{}' ({} -> {}: {})",
            rule.name,
            rule.trigger,
            rule.target,
            rule.describe_effect()
        );
        self.rules.push(rule);
        self.rules.len() - 1
    }

    pub fn rule(&self, id: RuleId) -> Option<&ReactionRule> {
        self.rules.get(id)
    }

    pub fn rule_mut(&mut self, id: RuleId) -> Option<&mut ReactionRule> {
        self.rules.get_mut(id)
    }

    pub fn rules(&self) -> &[ReactionRule] {
        &self.rules
    }

    /// View of the active camera at the engine's aspect ratio
    pub fn camera_view(&self) -> Option<CameraView> {
        self.scene.camera_view(self.engine.aspect_ratio())
    }

    /// Immediate pick that does not touch drag state
    pub fn pick_at(&mut self, x: f32, y: f32) -> Option<PickResult> {
        let camera = self.camera_view()?;
        self.picker
            .pick_object(ScreenPoint::new(x, y), &camera, &self.scene, &self.engine)
    }

    /// Where the world origin of `id` currently appears on screen
    pub fn screen_position_of(&self, id: EntityId) -> Option<ScreenPoint> {
        let camera = self.camera_view()?;
        let position = self.scene.world_position(id)?;
        self.engine.project_world_point(position, &camera)
    }

    /// Runs one frame: drains queued pointer events in order, then evaluates
    /// the reaction rules against the resulting scene
    pub fn tick(&mut self) -> TickReport {
        self.engine.advance_frame();
        let mut report = TickReport::new(self.engine.now());

        while let Some(event) = self.queue.pop_front() {
            self.apply_event(event, &mut report);
        }

        self.evaluate_reactions(&mut report);
        report
    }

    fn apply_event(&mut self, event: PointerEvent, report: &mut TickReport) {
        match event {
            PointerEvent::Down {
                pointer_id,
                position,
            } => self.pointer_down(pointer_id, position, report),
            PointerEvent::Move {
                pointer_id,
                position,
            } => self.pointer_move(pointer_id, position, report),
            PointerEvent::Up { pointer_id } => {
                self.end_session(pointer_id, DragEndReason::Released, report)
            }
            PointerEvent::Cancel { pointer_id } => {
                self.end_session(pointer_id, DragEndReason::Cancelled, report)
            }
        }
    }

    /// Ends the pointer's session; a target that is gone wins over `reason`
    fn end_session(&mut self, pointer_id: PointerId, reason: DragEndReason, report: &mut TickReport) {
        let Some(session) = self.drags.end(pointer_id) else {
            return;
        };
        let reason = if self.scene.contains(session.target) {
            reason
        } else {
            DragEndReason::TargetRemoved
        };
        debug!(
            "[frame {}] pointer {} stopped dragging {} ({:?})",
            report.frame, pointer_id, session.target, reason
        );
        report.drags_ended.push(DragEnd { session, reason });
    }

    fn pointer_down(&mut self, pointer_id: PointerId, position: ScreenPoint, report: &mut TickReport) {
        let frame = report.frame;
        if self.drags.is_dragging(pointer_id) {
            trace!("[frame {}] pointer {} is already dragging, down ignored", frame, pointer_id);
            return;
        }

        let Some(camera) = self.camera_view() else {
            warn!("[frame {}] no active camera, pointer {} down ignored", frame, pointer_id);
            return;
        };

        let hit = self
            .picker
            .pick_object(position, &camera, &self.scene, &self.engine);
        report.picks.push(PointerPick {
            pointer_id,
            position,
            hit: hit.clone(),
        });

        let Some(hit) = hit else {
            trace!("[frame {}] pointer {} hit nothing", frame, pointer_id);
            return;
        };

        let Some(entity) = self.scene.entity(hit.entity) else {
            return;
        };
        if !entity.draggable {
            debug!("[frame {}] picked '{}', not draggable", frame, entity.name());
            return;
        }
        if self.drags.len() >= self.config.max_pointers {
            warn!(
                "[frame {}] {} drags already active, pointer {} ignored",
                frame,
                self.drags.len(),
                pointer_id
            );
            return;
        }

        let Some(origin) = self.scene.world_position(hit.entity) else {
            return;
        };
        let depth = camera.view_depth(origin);
        if !(depth.is_finite() && depth >= self.config.min_drag_depth) {
            debug!(
                "[frame {}] '{}' is too close to the eye to drag (depth {})",
                frame,
                entity.name(),
                depth
            );
            return;
        }

        let grabbed = self.engine.unproject_screen_point(position, &camera, depth);
        if !is_finite_vec(grabbed) {
            debug!("[frame {}] pointer {} has no grab point", frame, pointer_id);
            return;
        }
        let session = DragSession {
            pointer_id,
            target: hit.entity,
            grab_offset: grabbed - origin,
            depth,
            active: true,
        };
        if self.drags.begin(session) {
            info!(
                "[frame {}] pointer {} started dragging '{}'",
                frame,
                pointer_id,
                entity.name()
            );
            report.drags_started.push(session);
        }
    }

    fn pointer_move(&mut self, pointer_id: PointerId, position: ScreenPoint, report: &mut TickReport) {
        let frame = report.frame;
        let Some(session) = self.drags.session(pointer_id).copied() else {
            return;
        };

        if !self.scene.contains(session.target) {
            self.end_session(pointer_id, DragEndReason::TargetRemoved, report);
            return;
        }

        let Some(camera) = self.camera_view() else {
            warn!("[frame {}] no active camera, move of pointer {} ignored", frame, pointer_id);
            return;
        };

        let pointer_world = self
            .engine
            .unproject_screen_point(position, &camera, session.depth);
        if !is_finite_vec(pointer_world) {
            debug!("[frame {}] move of pointer {} has no world point", frame, pointer_id);
            return;
        }
        if let Err(err) = self
            .scene
            .set_world_position(session.target, session.target_position(pointer_world))
        {
            warn!("[frame {}] drag move failed: {}", frame, err);
            return;
        }
        trace!(
            "[frame {}] pointer {} moved {} to {:?}",
            frame,
            pointer_id,
            session.target,
            pointer_world
        );
    }

    fn evaluate_reactions(&mut self, report: &mut TickReport) {
        let frame = report.frame;
        let picked = report.picked_entities();

        for rule in self.rules.iter_mut() {
            let (Some(trigger), Some(target)) =
                (self.scene.id_of(&rule.trigger), self.scene.id_of(&rule.target))
            else {
                trace!("[frame {}] rule '{}' skipped, entity missing", frame, rule.name);
                continue;
            };

            if !rule.condition.holds(&self.scene, trigger, target, &picked) {
                continue;
            }

            let mut ctx = EffectContext::new(&mut self.scene, trigger, target, frame);
            match rule.fire(&mut ctx) {
                None => trace!("[frame {}] rule '{}' already fired", frame, rule.name),
                Some(Ok(())) => {
                    info!("[frame {}] rule '{}' fired", frame, rule.name);
                    report.fired.push(rule.name.clone());
                }
                Some(Err(source)) => {
                    let failure = EffectError {
                        rule: rule.name.clone(),
                        source,
                    };
                    warn!("[frame {}] {}", frame, failure);
                    report.failures.push(failure);
                }
            }
        }
    }
}
