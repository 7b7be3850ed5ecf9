//! Post-integration render synchronization.
//!
//! Projects each body's resolved position and rotation into a CSS
//! transform and writes it through the node handle, once per step, after
//! integration.

use crate::binding::BoundElement;
use crate::node::VisualNode;
use crate::physics::PhysicsWorld;

/// Formats the transform that centers a `width`×`height` box on
/// (`x`, `y`) and rotates it by `angle` radians.
///
/// Pure projection: identical inputs yield an identical string.
pub fn transform_css(x: f32, y: f32, angle: f32, width: f32, height: f32) -> String {
    format!(
        "translate({}px, {}px) rotate({}rad)",
        x - width / 2.0,
        y - height / 2.0,
        angle
    )
}

/// Advances each element's constant angular drift by one step. Called
/// once per simulation step, never from the projection itself.
pub fn advance_drift<N>(bound: &mut [BoundElement<N>]) {
    for element in bound {
        element.accumulated_rotation += element.rotation_drift;
    }
}

/// Writes each body's resolved position and rotation onto its node. The
/// rotation is the body's physical angle plus the accumulated drift.
///
/// Idempotent for unchanged body and drift state.
pub fn write_transforms<N: VisualNode>(world: &PhysicsWorld, bound: &[BoundElement<N>]) {
    for element in bound {
        let Some(body) = world.get_rigid_body(element.body_handle) else {
            continue;
        };
        let position = body.translation();
        let angle = body.rotation().angle() + element.accumulated_rotation;
        let (width, height) = element.node.size();
        element
            .node
            .set_transform(&transform_css(position.x, position.y, angle, width, height));
    }
}
