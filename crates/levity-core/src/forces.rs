//! The per-step custom force pass.
//!
//! Runs once per simulation step, before integration, so the integrator
//! consuming a step always sees this step's forces.

use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};

use crate::binding::BoundElement;
use crate::physics::PhysicsWorld;
use crate::pointer::{DragConstraint, PointerState};

/// Viewport extents used for boundary containment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Tuning constants for the force pass.
///
/// Magnitudes are product tuning, not load-bearing semantics — but their
/// relative ordering (pointer repulsion strongest, then boundary
/// containment, then separation) is what keeps the "avoid the cursor,
/// avoid each other, stay on screen" behavior intact for a typical body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceTuning {
    /// Velocity decay factor applied once per step.
    pub damping: f32,
    /// Radius around the cursor within which repulsion acts, in pixels.
    pub repulsion_radius: f32,
    /// Peak repulsion acceleration at zero distance, px/s². Scaled by
    /// body mass into a force, so every body accelerates equally.
    pub repulsion_strength: f32,
    /// Distance from each viewport edge where containment starts, in
    /// pixels.
    pub boundary_margin: f32,
    /// Containment force at full margin penetration. Deliberately not
    /// mass-scaled: heavier elements sag further into the margin.
    pub boundary_strength: f32,
    /// Minimum clearance between body centers, in pixels.
    pub min_separation: f32,
    /// Peak separation acceleration for near-coincident centers, px/s²,
    /// mass-scaled like repulsion.
    pub separation_strength: f32,
}

impl Default for ForceTuning {
    fn default() -> Self {
        Self {
            damping: 0.95,
            repulsion_radius: 200.0,
            repulsion_strength: 2400.0,
            boundary_margin: 100.0,
            boundary_strength: 12_000.0,
            min_separation: 120.0,
            separation_strength: 800.0,
        }
    }
}

/// Applies damping and the three custom force contributions to every
/// bound body: pointer repulsion, boundary containment, and pairwise
/// separation, in that order.
///
/// Pairwise separation is O(n²) over the bound set; the element count is
/// a fixed handful, so this never matters.
pub fn apply_forces<N>(
    world: &mut PhysicsWorld,
    bound: &[BoundElement<N>],
    pointer: &PointerState,
    drag: &DragConstraint,
    viewport: Viewport,
    tuning: &ForceTuning,
) {
    // Positions snapshotted up front so the pairwise pass reads a
    // consistent view while bodies are mutated one at a time.
    let centers: Vec<Option<Vector>> = bound
        .iter()
        .map(|element| {
            world
                .get_rigid_body(element.body_handle)
                .map(|body| body.translation())
        })
        .collect();

    for (index, element) in bound.iter().enumerate() {
        let Some(body) = world.get_rigid_body_mut(element.body_handle) else {
            continue;
        };
        let position = body.translation();
        let mass = body.mass();

        // 1. Damping: bleed energy so the system trends toward rest.
        let damped = body.linvel() * tuning.damping;
        body.set_linvel(damped, true);

        body.reset_forces(true);
        let mut force = Vector::new(0.0, 0.0);

        // 2. Pointer repulsion, suppressed while a drag holds any body.
        //    A cursor exactly on the center contributes nothing: there is
        //    no direction to push.
        if drag.target().is_none() {
            if let Some(cursor) = pointer.position() {
                let delta = position - cursor;
                let distance = delta.length();
                if distance > 0.0 && distance < tuning.repulsion_radius {
                    let magnitude = tuning.repulsion_strength
                        * (1.0 - distance / tuning.repulsion_radius)
                        * mass;
                    force += delta / distance * magnitude;
                }
            }
        }

        // 3. Boundary containment, active strictly inside the margin.
        let margin = tuning.boundary_margin;
        if position.x < margin {
            force.x += (margin - position.x) / margin * tuning.boundary_strength;
        } else if position.x > viewport.width - margin {
            force.x -= (position.x - (viewport.width - margin)) / margin
                * tuning.boundary_strength;
        }
        if position.y < margin {
            force.y += (margin - position.y) / margin * tuning.boundary_strength;
        } else if position.y > viewport.height - margin {
            force.y -= (position.y - (viewport.height - margin)) / margin
                * tuning.boundary_strength;
        }

        // 4. Pairwise separation from every other bound body, along the
        //    line between centers, ramping to zero at the clearance.
        for (other_index, other_center) in centers.iter().enumerate() {
            if other_index == index {
                continue;
            }
            let Some(other) = other_center else {
                continue;
            };
            let delta = position - *other;
            let distance = delta.length();
            if distance > 0.0 && distance < tuning.min_separation {
                let magnitude = tuning.separation_strength
                    * (1.0 - distance / tuning.min_separation)
                    * mass;
                force += delta / distance * magnitude;
            }
        }

        body.add_force(force, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::ElementBinder;
    use crate::node::mock::MockNode;

    const VIEWPORT: Viewport = Viewport {
        width: 1280.0,
        height: 720.0,
    };

    /// Binds one small node centered at (x, y), far from every edge by
    /// default.
    fn bind_at(
        world: &mut PhysicsWorld,
        binder: &mut ElementBinder,
        x: f32,
        y: f32,
    ) -> BoundElement<MockNode> {
        binder.bind(world, MockNode::new(x - 5.0, y - 5.0, 10.0, 10.0))
    }

    fn speed(world: &PhysicsWorld, element: &BoundElement<MockNode>) -> f32 {
        world
            .get_rigid_body(element.body_handle)
            .unwrap()
            .linvel()
            .length()
    }

    #[test]
    fn test_damping_never_increases_speed() {
        let mut world = PhysicsWorld::new();
        let mut binder = ElementBinder::new(1);
        let element = bind_at(&mut world, &mut binder, 640.0, 360.0);

        world
            .get_rigid_body_mut(element.body_handle)
            .unwrap()
            .set_linvel(Vector::new(30.0, -40.0), true);

        let before = speed(&world, &element);
        let bound = vec![element];
        apply_forces(
            &mut world,
            &bound,
            &PointerState::new(),
            &DragConstraint::new(),
            VIEWPORT,
            &ForceTuning::default(),
        );
        let after = speed(&world, &bound[0]);

        assert!(after <= before);
        assert!((after - before * 0.95).abs() < 1e-3);
    }

    #[test]
    fn test_cursor_on_center_contributes_no_repulsion() {
        let mut world = PhysicsWorld::new();
        let mut binder = ElementBinder::new(1);
        let bound = vec![bind_at(&mut world, &mut binder, 640.0, 360.0)];

        let mut pointer = PointerState::new();
        pointer.update_position(640.0, 360.0);

        apply_forces(
            &mut world,
            &bound,
            &pointer,
            &DragConstraint::new(),
            VIEWPORT,
            &ForceTuning::default(),
        );
        world.step();

        assert_eq!(speed(&world, &bound[0]), 0.0);
    }

    #[test]
    fn test_nearby_cursor_pushes_body_away() {
        let mut world = PhysicsWorld::new();
        let mut binder = ElementBinder::new(1);
        let bound = vec![bind_at(&mut world, &mut binder, 640.0, 360.0)];

        let mut pointer = PointerState::new();
        pointer.update_position(590.0, 360.0); // 50px to the left

        apply_forces(
            &mut world,
            &bound,
            &pointer,
            &DragConstraint::new(),
            VIEWPORT,
            &ForceTuning::default(),
        );
        world.step();

        let velocity = world
            .get_rigid_body(bound[0].body_handle)
            .unwrap()
            .linvel();
        assert!(velocity.x > 0.0, "push should point away from the cursor");
        assert_eq!(velocity.y, 0.0);
    }

    #[test]
    fn test_repulsion_acceleration_is_mass_independent() {
        // Equal distance from the cursor, very different masses: the
        // mass-scaled force must produce the same acceleration.
        let mut world_small = PhysicsWorld::new();
        let mut world_large = PhysicsWorld::new();
        let mut binder = ElementBinder::new(1);

        let small = vec![binder.bind(
            &mut world_small,
            MockNode::new(635.0, 355.0, 10.0, 10.0),
        )];
        let large = vec![binder.bind(
            &mut world_large,
            MockNode::new(540.0, 310.0, 200.0, 100.0),
        )];

        let mut pointer = PointerState::new();
        pointer.update_position(590.0, 360.0);

        let tuning = ForceTuning::default();
        apply_forces(
            &mut world_small,
            &small,
            &pointer,
            &DragConstraint::new(),
            VIEWPORT,
            &tuning,
        );
        apply_forces(
            &mut world_large,
            &large,
            &pointer,
            &DragConstraint::new(),
            VIEWPORT,
            &tuning,
        );
        world_small.step();
        world_large.step();

        let v_small = speed(&world_small, &small[0]);
        let v_large = speed(&world_large, &large[0]);
        assert!((v_small - v_large).abs() < 1e-3);
    }

    #[test]
    fn test_drag_suppresses_repulsion_for_every_body() {
        let mut world = PhysicsWorld::new();
        let mut binder = ElementBinder::new(1);
        let bound = vec![
            bind_at(&mut world, &mut binder, 640.0, 360.0),
            bind_at(&mut world, &mut binder, 900.0, 360.0),
        ];

        let mut pointer = PointerState::new();
        pointer.update_position(590.0, 360.0);

        // Hold the far body; the near one must feel no repulsion.
        let mut drag = DragConstraint::new();
        drag.try_attach(&world, &bound, Vector::new(900.0, 360.0));
        assert!(drag.target().is_some());

        apply_forces(
            &mut world,
            &bound,
            &pointer,
            &drag,
            VIEWPORT,
            &ForceTuning::default(),
        );
        world.step();

        assert_eq!(speed(&world, &bound[0]), 0.0);
    }

    #[test]
    fn test_boundary_threshold_is_exclusive() {
        let tuning = ForceTuning::default();

        // Exactly on the margin: no containment force.
        let mut world = PhysicsWorld::new();
        let mut binder = ElementBinder::new(1);
        let at_margin = vec![bind_at(
            &mut world,
            &mut binder,
            tuning.boundary_margin,
            360.0,
        )];
        apply_forces(
            &mut world,
            &at_margin,
            &PointerState::new(),
            &DragConstraint::new(),
            VIEWPORT,
            &tuning,
        );
        world.step();
        assert_eq!(speed(&world, &at_margin[0]), 0.0);

        // One pixel inside the margin: pushed back toward the interior.
        let mut world = PhysicsWorld::new();
        let mut binder = ElementBinder::new(1);
        let inside = vec![bind_at(
            &mut world,
            &mut binder,
            tuning.boundary_margin - 1.0,
            360.0,
        )];
        apply_forces(
            &mut world,
            &inside,
            &PointerState::new(),
            &DragConstraint::new(),
            VIEWPORT,
            &tuning,
        );
        world.step();
        let velocity = world
            .get_rigid_body(inside[0].body_handle)
            .unwrap()
            .linvel();
        assert!(velocity.x > 0.0);
    }

    #[test]
    fn test_boundary_scales_with_penetration() {
        let tuning = ForceTuning::default();

        let speed_at = |offset: f32| {
            let mut world = PhysicsWorld::new();
            let mut binder = ElementBinder::new(1);
            let bound = vec![bind_at(&mut world, &mut binder, offset, 360.0)];
            apply_forces(
                &mut world,
                &bound,
                &PointerState::new(),
                &DragConstraint::new(),
                VIEWPORT,
                &tuning,
            );
            world.step();
            speed(&world, &bound[0])
        };

        assert!(speed_at(20.0) > speed_at(80.0));
    }

    #[test]
    fn test_separation_pushes_apart_along_center_line() {
        let mut world = PhysicsWorld::new();
        let mut binder = ElementBinder::new(1);
        let bound = vec![
            bind_at(&mut world, &mut binder, 610.0, 360.0),
            bind_at(&mut world, &mut binder, 670.0, 360.0), // 60px apart
        ];

        apply_forces(
            &mut world,
            &bound,
            &PointerState::new(),
            &DragConstraint::new(),
            VIEWPORT,
            &ForceTuning::default(),
        );
        world.step();

        let left = world
            .get_rigid_body(bound[0].body_handle)
            .unwrap()
            .linvel();
        let right = world
            .get_rigid_body(bound[1].body_handle)
            .unwrap()
            .linvel();

        assert!(left.x < 0.0);
        assert!(right.x > 0.0);
        assert_eq!(left.y, 0.0);
        assert_eq!(right.y, 0.0);
    }

    #[test]
    fn test_separation_ramps_to_zero_at_clearance() {
        let tuning = ForceTuning::default();

        let speed_at_distance = |distance: f32| {
            let mut world = PhysicsWorld::new();
            let mut binder = ElementBinder::new(1);
            let bound = vec![
                bind_at(&mut world, &mut binder, 640.0 - distance / 2.0, 360.0),
                bind_at(&mut world, &mut binder, 640.0 + distance / 2.0, 360.0),
            ];
            apply_forces(
                &mut world,
                &bound,
                &PointerState::new(),
                &DragConstraint::new(),
                VIEWPORT,
                &tuning,
            );
            world.step();
            speed(&world, &bound[0])
        };

        // Monotonically weaker as the gap approaches the clearance.
        assert!(speed_at_distance(40.0) > speed_at_distance(80.0));
        assert!(speed_at_distance(80.0) > speed_at_distance(110.0));
        // Exactly at the clearance: nothing.
        assert_eq!(speed_at_distance(tuning.min_separation), 0.0);
    }

    #[test]
    fn test_tuning_roundtrips_through_json() {
        let tuning = ForceTuning::default();
        let json = serde_json::to_string(&tuning).unwrap();
        let parsed: ForceTuning = serde_json::from_str(&json).unwrap();
        assert_eq!(tuning, parsed);
    }
}
