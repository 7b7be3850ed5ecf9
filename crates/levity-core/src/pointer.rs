//! Pointer state and the drag constraint.

use rapier2d::prelude::*;

use crate::binding::BoundElement;
use crate::physics::PhysicsWorld;

/// Fraction of the pointer gap closed per second while dragging.
const DRAG_STIFFNESS: f32 = 12.0;

/// Cursor state shared between the pointer-event source and the per-step
/// force pass.
///
/// Single writer (the event handler), read once per step. Both run on the
/// same single-threaded frame scheduler, so no synchronization is needed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    position: Option<Vector>,
    pressed: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the latest cursor position in viewport coordinates.
    pub fn update_position(&mut self, x: f32, y: f32) {
        self.position = Some(Vector::new(x, y));
    }

    /// Latest cursor position, absent until the first move event.
    pub fn position(&self) -> Option<Vector> {
        self.position
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

/// Mouse constraint built from rapier primitives: holds at most one body
/// and steers it toward the cursor by velocity.
///
/// Holds a non-owning handle; the body itself lives in the activation's
/// world.
#[derive(Debug, Clone, Copy)]
pub struct DragConstraint {
    target: Option<RigidBodyHandle>,
    /// Fraction of the cursor gap closed per second.
    stiffness: f32,
}

impl Default for DragConstraint {
    fn default() -> Self {
        Self::new()
    }
}

impl DragConstraint {
    pub fn new() -> Self {
        Self {
            target: None,
            stiffness: DRAG_STIFFNESS,
        }
    }

    /// Handle of the held body, if a drag is in progress.
    pub fn target(&self) -> Option<RigidBodyHandle> {
        self.target
    }

    /// Attaches to the first bound body whose collider contains `point`.
    /// Rotations are locked, so an axis-aligned extent test suffices.
    pub fn try_attach<N>(
        &mut self,
        world: &PhysicsWorld,
        bound: &[BoundElement<N>],
        point: Vector,
    ) {
        for element in bound {
            let Some(collider) = world.collider_set.get(element.collider_handle) else {
                continue;
            };
            let Some(cuboid) = collider.shape().as_cuboid() else {
                continue;
            };
            let center = collider.translation();
            if (point.x - center.x).abs() <= cuboid.half_extents.x
                && (point.y - center.y).abs() <= cuboid.half_extents.y
            {
                self.target = Some(element.body_handle);
                return;
            }
        }
    }

    /// Drops the held body, if any.
    pub fn release(&mut self) {
        self.target = None;
    }

    /// Steers the held body toward the cursor. No-op without a target or
    /// a known cursor position.
    pub fn apply(&self, world: &mut PhysicsWorld, pointer: &PointerState) {
        let (Some(handle), Some(cursor)) = (self.target, pointer.position()) else {
            return;
        };
        let Some(body) = world.get_rigid_body_mut(handle) else {
            return;
        };
        let delta = cursor - body.translation();
        body.set_linvel(delta * self.stiffness, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::ElementBinder;
    use crate::node::mock::MockNode;

    fn bound_pair(world: &mut PhysicsWorld) -> Vec<BoundElement<MockNode>> {
        let mut binder = ElementBinder::new(3);
        vec![
            binder.bind(world, MockNode::new(100.0, 100.0, 80.0, 40.0)),
            binder.bind(world, MockNode::new(400.0, 400.0, 80.0, 40.0)),
        ]
    }

    #[test]
    fn test_attach_picks_containing_body() {
        let mut world = PhysicsWorld::new();
        let bound = bound_pair(&mut world);
        let mut drag = DragConstraint::new();

        // Center of the second element.
        drag.try_attach(&world, &bound, Vector::new(440.0, 420.0));
        assert_eq!(drag.target(), Some(bound[1].body_handle));

        drag.release();
        assert_eq!(drag.target(), None);
    }

    #[test]
    fn test_attach_misses_outside_every_body() {
        let mut world = PhysicsWorld::new();
        let bound = bound_pair(&mut world);
        let mut drag = DragConstraint::new();

        drag.try_attach(&world, &bound, Vector::new(700.0, 50.0));
        assert_eq!(drag.target(), None);
    }

    #[test]
    fn test_drag_steers_body_toward_cursor() {
        let mut world = PhysicsWorld::new();
        let bound = bound_pair(&mut world);

        let mut pointer = PointerState::new();
        pointer.update_position(140.0, 120.0);

        let mut drag = DragConstraint::new();
        drag.try_attach(&world, &bound, Vector::new(140.0, 120.0));
        assert_eq!(drag.target(), Some(bound[0].body_handle));

        // Move the cursor away and step once.
        pointer.update_position(340.0, 120.0);
        drag.apply(&mut world, &pointer);
        let start_x = world
            .get_rigid_body(bound[0].body_handle)
            .unwrap()
            .translation()
            .x;
        world.step();
        let end_x = world
            .get_rigid_body(bound[0].body_handle)
            .unwrap()
            .translation()
            .x;

        assert!(end_x > start_x, "held body should move toward the cursor");
    }

    #[test]
    fn test_pressed_flag_roundtrip() {
        let mut pointer = PointerState::new();
        assert!(!pointer.is_pressed());
        pointer.set_pressed(true);
        assert!(pointer.is_pressed());
        pointer.set_pressed(false);
        assert!(!pointer.is_pressed());
    }
}
