//! Levity Core Library
//!
//! The DOM-to-physics binding engine behind the page's antigravity mode:
//! it owns a `Rapier2D` world per activation, binds externally-owned
//! visual nodes to rigid bodies, applies the custom force field every
//! step, mirrors body state back as CSS transforms, and restores the
//! original styles on deactivation.
//!
//! The engine is written against the [`VisualNode`] trait instead of the
//! DOM directly, so it builds and runs its tests headless on native.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod binding;
pub mod engine;
pub mod forces;
pub mod node;
pub mod physics;
pub mod pointer;
pub mod sync;

pub use binding::{
    BodyTuning, BoundElement, ElementBinder, RESTORE_DURATION_MS, RESTORE_TRANSITION,
};
pub use engine::{AntigravityEngine, EffectPhase};
pub use forces::{ForceTuning, Viewport};
pub use node::{Rect, StyleSnapshot, VisualNode};
pub use physics::{PHYSICS_DT, PhysicsWorld, zero_gravity};
pub use pointer::{DragConstraint, PointerState};
