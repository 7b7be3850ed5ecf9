//! Element-to-body binding, and the restore path back to layout flow.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};

use crate::node::{StyleSnapshot, VisualNode};
use crate::physics::PhysicsWorld;

/// Stacking order for bound elements while the effect is active. Sits one
/// above the overlay surface so elements stay visible through it.
const BOUND_Z_INDEX: &str = "1001";

/// Scale of the per-element constant rotation drift, in radians per step.
const ROTATION_DRIFT_SCALE: f32 = 0.0008;

/// Restore transition applied while an element animates back to layout
/// flow. The overshooting bezier gives the snap-back a little bounce.
pub const RESTORE_TRANSITION: &str = "all 0.6s cubic-bezier(0.34, 1.56, 0.64, 1)";

/// Duration of [`RESTORE_TRANSITION`] in milliseconds. After this much
/// time the captured transition value is put back.
pub const RESTORE_DURATION_MS: u32 = 600;

/// Physical material of a bound body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyTuning {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl Default for BodyTuning {
    fn default() -> Self {
        Self {
            restitution: 0.3,
            friction: 0.05,
            density: 0.001,
        }
    }
}

/// One visual node bound to one rigid body for the lifetime of an
/// activation.
pub struct BoundElement<N> {
    /// Externally-owned node handle.
    pub node: N,
    /// Body owned by the activation's world.
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
    /// Center position captured at bind time.
    pub origin: Vector,
    /// Inline styles captured at bind time, written back on restore.
    pub snapshot: StyleSnapshot,
    /// Constant angular drift, radians per step.
    pub rotation_drift: f32,
    /// Drift accumulated since bind.
    pub accumulated_rotation: f32,
}

impl<N: VisualNode> BoundElement<N> {
    /// Starts animating the element back to its natural layout position,
    /// restoring the position and z-index captured at bind time.
    pub fn begin_restore(&self) {
        self.node.set_transition(RESTORE_TRANSITION);
        self.node.set_transform("none");
        self.node.set_position(&self.snapshot.position);
        self.node.set_z_index(&self.snapshot.z_index);
    }

    /// Puts back the captured transition value. Called once the restore
    /// transition has run its course, so a later activation starts from
    /// clean style state.
    pub fn finish_restore(&self) {
        self.node.set_transition(&self.snapshot.transition);
    }
}

/// Binds visual nodes to freshly created physics bodies.
///
/// Holds the RNG that hands out rotation drift, so drift sequences are
/// deterministic for a given seed.
#[derive(Debug)]
pub struct ElementBinder {
    tuning: BodyTuning,
    rng: ChaCha8Rng,
}

impl ElementBinder {
    /// Creates a binder with the default body material.
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, BodyTuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: BodyTuning) -> Self {
        Self {
            tuning,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Binds every node in order, skipping nodes with an empty rectangle
    /// and nodes already bound earlier in the list. Partial binding is
    /// fine; whatever subset of the page is present joins the simulation.
    pub fn bind_all<N: VisualNode>(
        &mut self,
        world: &mut PhysicsWorld,
        nodes: Vec<N>,
    ) -> Vec<BoundElement<N>> {
        let mut bound: Vec<BoundElement<N>> = Vec::with_capacity(nodes.len());
        for node in nodes {
            if node.bounding_rect().is_empty() {
                tracing::debug!("skipping node with empty rectangle");
                continue;
            }
            if bound.iter().any(|existing| existing.node.same_node(&node)) {
                tracing::debug!("node already bound; skipping duplicate");
                continue;
            }
            bound.push(self.bind(world, node));
        }
        bound
    }

    /// Binds one node: captures its rectangle and style snapshot, creates
    /// a matching rectangular body, and detaches the node from layout so
    /// transform writes alone move it.
    pub fn bind<N: VisualNode>(&mut self, world: &mut PhysicsWorld, node: N) -> BoundElement<N> {
        let rect = node.bounding_rect();
        let (cx, cy) = rect.center();
        let snapshot = node.read_styles();

        // Rotations are locked: visible spin comes from the constant
        // drift, not from collision torque.
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(Vector::new(cx, cy))
            .lock_rotations()
            .ccd_enabled(true)
            .build();
        let body_handle = world.add_rigid_body(rigid_body);

        let collider = ColliderBuilder::cuboid(rect.width / 2.0, rect.height / 2.0)
            .restitution(self.tuning.restitution)
            .friction(self.tuning.friction)
            .density(self.tuning.density)
            .build();
        let collider_handle = world.add_collider(collider, body_handle);

        node.set_position("fixed");
        node.set_z_index(BOUND_Z_INDEX);
        node.set_transition("none");

        let rotation_drift = (self.rng.random::<f32>() - 0.5) * ROTATION_DRIFT_SCALE;

        BoundElement {
            node,
            body_handle,
            collider_handle,
            origin: Vector::new(cx, cy),
            snapshot,
            rotation_drift,
            accumulated_rotation: 0.0,
        }
    }
}
