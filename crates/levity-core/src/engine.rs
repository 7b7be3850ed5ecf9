//! Activation lifecycle and per-frame orchestration.

use crate::binding::{BodyTuning, BoundElement, ElementBinder};
use crate::forces::{self, ForceTuning, Viewport};
use crate::node::VisualNode;
use crate::physics::PhysicsWorld;
use crate::pointer::{DragConstraint, PointerState};
use crate::sync;

/// Lifecycle phase of one activation of the effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectPhase {
    /// No world exists and no element is bound.
    #[default]
    Inactive,
    /// World and bindings are being constructed.
    Initializing,
    /// Force and render steps occur every frame.
    Running,
    /// Elements are animating back to layout flow; the world is already
    /// gone.
    Restoring,
}

/// The antigravity engine: owns one physics world per activation and
/// keeps it synchronized with the bound visual nodes.
///
/// Everything here runs on a single-threaded frame scheduler; the caller
/// drives [`step`](Self::step) once per fixed timestep and forwards
/// pointer and resize events as they arrive.
pub struct AntigravityEngine<N: VisualNode> {
    world: Option<PhysicsWorld>,
    bound: Vec<BoundElement<N>>,
    binder: ElementBinder,
    pointer: PointerState,
    drag: DragConstraint,
    tuning: ForceTuning,
    viewport: Viewport,
    phase: EffectPhase,
}

impl<N: VisualNode> AntigravityEngine<N> {
    /// Creates an inactive engine with the default tuning.
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self::with_tuning(seed, viewport, ForceTuning::default(), BodyTuning::default())
    }

    pub fn with_tuning(
        seed: u64,
        viewport: Viewport,
        tuning: ForceTuning,
        body_tuning: BodyTuning,
    ) -> Self {
        Self {
            world: None,
            bound: Vec::new(),
            binder: ElementBinder::with_tuning(seed, body_tuning),
            pointer: PointerState::new(),
            drag: DragConstraint::new(),
            tuning,
            viewport,
            phase: EffectPhase::Inactive,
        }
    }

    pub fn phase(&self) -> EffectPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == EffectPhase::Running
    }

    /// Elements bound by the current activation.
    pub fn bound_elements(&self) -> &[BoundElement<N>] {
        &self.bound
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Builds a fresh world and binds `nodes` to it.
    ///
    /// An activation issued while a previous restore is still animating
    /// finishes that restore first, so bindings always start from clean
    /// style state. Bindings use live node measurements, never cached
    /// ones, so repeated toggles are idempotent.
    pub fn activate(&mut self, nodes: Vec<N>) {
        if self.phase == EffectPhase::Restoring {
            self.finish_restore();
        }
        if self.phase != EffectPhase::Inactive {
            return;
        }
        self.phase = EffectPhase::Initializing;

        let mut world = PhysicsWorld::new();
        self.bound = self.binder.bind_all(&mut world, nodes);
        self.world = Some(world);
        self.phase = EffectPhase::Running;
        tracing::info!(elements = self.bound.len(), "antigravity activated");
    }

    /// Advances the simulation by one fixed timestep: custom forces, drag
    /// steering, integration, then render sync. The integrator always
    /// sees the forces applied in its own step.
    pub fn step(&mut self) {
        if self.phase != EffectPhase::Running {
            return;
        }
        let Some(world) = self.world.as_mut() else {
            return;
        };

        forces::apply_forces(
            world,
            &self.bound,
            &self.pointer,
            &self.drag,
            self.viewport,
            &self.tuning,
        );
        self.drag.apply(world, &self.pointer);
        world.step();
        sync::advance_drift(&mut self.bound);
        sync::write_transforms(world, &self.bound);
    }

    /// Records a cursor move.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer.update_position(x, y);
    }

    /// Primary-button press: picks the body under the cursor, if any.
    pub fn pointer_pressed(&mut self) {
        self.pointer.set_pressed(true);
        if self.phase != EffectPhase::Running {
            return;
        }
        let (Some(world), Some(cursor)) = (self.world.as_ref(), self.pointer.position()) else {
            return;
        };
        self.drag.try_attach(world, &self.bound, cursor);
    }

    /// Primary-button release: drops any held body.
    pub fn pointer_released(&mut self) {
        self.pointer.set_pressed(false);
        self.drag.release();
    }

    /// Adapts boundary containment to a resized viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Tears down the world and starts animating every bound element back
    /// to its captured layout state. World disposal and style restoration
    /// are independent concerns; both happen here, in the same call, so
    /// no further step can touch the discarded bodies.
    ///
    /// The caller schedules [`finish_restore`](Self::finish_restore)
    /// after [`RESTORE_DURATION_MS`](crate::binding::RESTORE_DURATION_MS)
    /// to put the captured transition values back.
    pub fn deactivate(&mut self) {
        if self.phase != EffectPhase::Running && self.phase != EffectPhase::Initializing {
            return;
        }
        self.drag.release();
        self.world = None; // drops every body with it
        for element in &self.bound {
            element.begin_restore();
        }
        self.phase = EffectPhase::Restoring;
        tracing::info!(elements = self.bound.len(), "antigravity deactivated");
    }

    /// Completes a restore: puts back the captured transition strings and
    /// clears the bound set. No-op unless a restore is in progress, so a
    /// stale timer firing after a re-activation does nothing.
    pub fn finish_restore(&mut self) {
        if self.phase != EffectPhase::Restoring {
            return;
        }
        for element in self.bound.drain(..) {
            element.finish_restore();
        }
        self.phase = EffectPhase::Inactive;
    }
}
