//! Antigravity lifecycle hook.
//!
//! Watches the activation flag and, on its enabling edge, builds the
//! engine against the overlay canvas, binds the page targets, attaches
//! the window-level pointer and resize listeners, and starts the
//! fixed-timestep `requestAnimationFrame` loop. On the disabling edge the
//! loop and listeners are detached synchronously, then the engine
//! restores the page and a timeout finishes the restore.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use levity_core::{AntigravityEngine, RESTORE_DURATION_MS, Viewport};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent};
use yew::prelude::*;

use crate::dom::{self, DomElement};

/// Fixed timestep in milliseconds (60Hz, matching the physics step).
const PHYSICS_DT_MS: f64 = 1000.0 / 60.0;

/// Cap on the per-frame delta so a backgrounded tab does not trigger a
/// catch-up spiral when it resumes.
const MAX_FRAME_DELTA_MS: f64 = 100.0;

type WebEngine = AntigravityEngine<DomElement>;
type SharedEngine = Rc<RefCell<Option<WebEngine>>>;
type FrameClosure = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Handle returned by [`use_antigravity`].
#[derive(Clone)]
pub struct AntigravityHandle {
    engine: SharedEngine,
    /// True from the moment an activation has bound the page until its
    /// disabling edge.
    pub initialized: UseStateHandle<bool>,
}

impl PartialEq for AntigravityHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.engine, &other.engine)
    }
}

/// Hook driving the antigravity engine from the activation flag.
///
/// If the overlay canvas is not rendered yet when the flag flips on, the
/// attempt is inert; the next toggle retries against the then-rendered
/// surface.
#[hook]
pub fn use_antigravity(active: bool, canvas_ref: NodeRef) -> AntigravityHandle {
    let engine: SharedEngine = use_mut_ref(|| None);
    let initialized = use_state(|| false);

    // Accumulator state for the fixed timestep.
    let accumulated_time = use_mut_ref(|| 0.0f64);
    let last_time = use_mut_ref(|| 0.0f64);

    // Pending animation frame, for cancellation on the disabling edge.
    let animation_frame_id = use_mut_ref(|| None::<i32>);

    {
        let engine = engine.clone();
        let initialized = initialized.clone();
        let accumulated_time = accumulated_time.clone();
        let last_time = last_time.clone();
        let animation_frame_id = animation_frame_id.clone();
        let canvas_ref = canvas_ref.clone();

        use_effect_with(active, move |&active| {
            // Closure reference for cleanup (to break the rAF reference
            // cycle) and the listeners bound to this activation.
            let closure_for_cleanup: FrameClosure = Rc::new(RefCell::new(None));
            let closure_for_cleanup_clone = closure_for_cleanup.clone();
            let listeners: Rc<RefCell<Vec<EventListener>>> = Rc::new(RefCell::new(Vec::new()));
            let listeners_for_cleanup = listeners.clone();
            let animation_frame_for_cleanup = animation_frame_id.clone();

            if active {
                if let Some(window) = web_sys::window() {
                    if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                        let viewport = viewport_from(&window);
                        resize_canvas(&canvas, viewport);

                        // Fresh world and bindings for this activation.
                        // The engine itself is kept across toggles so a
                        // re-activation during a restore window can
                        // finish that restore first.
                        let seed = js_sys::Date::now() as u64;
                        {
                            let mut engine_ref = engine.borrow_mut();
                            let eng = engine_ref
                                .get_or_insert_with(|| AntigravityEngine::new(seed, viewport));
                            eng.resize(viewport);
                            eng.activate(dom::discover_targets());
                        }
                        initialized.set(true);

                        attach_listeners(&listeners, &window, &engine, &canvas);
                        start_frame_loop(
                            &window,
                            &closure_for_cleanup,
                            &engine,
                            &accumulated_time,
                            &last_time,
                            &animation_frame_id,
                        );
                    } else {
                        tracing::debug!("no overlay surface yet; activation attempt is inert");
                    }
                }
            } else {
                // Disabling edge: the previous effect's cleanup already
                // detached the loop and listeners; restore the page and
                // drop the world.
                let deactivated = {
                    let mut engine_ref = engine.borrow_mut();
                    match engine_ref.as_mut() {
                        Some(eng) if eng.is_running() => {
                            eng.deactivate();
                            true
                        }
                        _ => false,
                    }
                };
                if deactivated {
                    initialized.set(false);
                    let engine = engine.clone();
                    Timeout::new(RESTORE_DURATION_MS, move || {
                        if let Some(eng) = engine.borrow_mut().as_mut() {
                            eng.finish_restore();
                        }
                    })
                    .forget();
                }
            }

            // Cleanup: cancel the pending frame, break the closure cycle,
            // drop the listeners. Runs on the disabling edge before the
            // restore starts, so no step can touch discarded bodies.
            move || {
                if let Some(id) = *animation_frame_for_cleanup.borrow() {
                    if let Some(window) = web_sys::window() {
                        let _ = window.cancel_animation_frame(id);
                    }
                }
                *closure_for_cleanup_clone.borrow_mut() = None;
                listeners_for_cleanup.borrow_mut().clear();
            }
        });
    }

    AntigravityHandle {
        engine,
        initialized,
    }
}

/// Window-level listeners: the pointer bridge and viewport-resize
/// adaptation. Dropping the returned listeners detaches everything.
fn attach_listeners(
    listeners: &Rc<RefCell<Vec<EventListener>>>,
    window: &web_sys::Window,
    engine: &SharedEngine,
    canvas: &HtmlCanvasElement,
) {
    let mut listeners = listeners.borrow_mut();

    {
        let engine = engine.clone();
        listeners.push(EventListener::new(window, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            if let Some(eng) = engine.borrow_mut().as_mut() {
                eng.pointer_moved(event.client_x() as f32, event.client_y() as f32);
            }
        }));
    }

    {
        let engine = engine.clone();
        listeners.push(EventListener::new(window, "mousedown", move |_| {
            if let Some(eng) = engine.borrow_mut().as_mut() {
                eng.pointer_pressed();
            }
        }));
    }

    {
        let engine = engine.clone();
        listeners.push(EventListener::new(window, "mouseup", move |_| {
            if let Some(eng) = engine.borrow_mut().as_mut() {
                eng.pointer_released();
            }
        }));
    }

    {
        let engine = engine.clone();
        let canvas = canvas.clone();
        listeners.push(EventListener::new(window, "resize", move |_| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let viewport = viewport_from(&window);
            resize_canvas(&canvas, viewport);
            if let Some(eng) = engine.borrow_mut().as_mut() {
                eng.resize(viewport);
            }
        }));
    }
}

/// Starts the rAF loop: accumulate real time, run whole physics steps,
/// re-arm. The closure holds a reference to itself through `closure`;
/// the effect cleanup breaks that cycle.
fn start_frame_loop(
    window: &web_sys::Window,
    closure: &FrameClosure,
    engine: &SharedEngine,
    accumulated_time: &Rc<RefCell<f64>>,
    last_time: &Rc<RefCell<f64>>,
    animation_frame_id: &Rc<RefCell<Option<i32>>>,
) {
    *accumulated_time.borrow_mut() = 0.0;
    *last_time.borrow_mut() = 0.0;

    let closure_clone = closure.clone();
    let engine = engine.clone();
    let accumulated_time = accumulated_time.clone();
    let last_time = last_time.clone();
    let animation_frame_id_for_loop = animation_frame_id.clone();

    *closure.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
        let last = *last_time.borrow();
        let delta = if last == 0.0 {
            PHYSICS_DT_MS
        } else {
            (timestamp - last).min(MAX_FRAME_DELTA_MS)
        };
        *last_time.borrow_mut() = timestamp;
        *accumulated_time.borrow_mut() += delta;

        {
            let mut engine_ref = engine.borrow_mut();
            let Some(eng) = engine_ref.as_mut() else {
                return;
            };
            if !eng.is_running() {
                return;
            }
            while *accumulated_time.borrow() >= PHYSICS_DT_MS {
                eng.step();
                *accumulated_time.borrow_mut() -= PHYSICS_DT_MS;
            }
        }

        // Re-arm for the next frame.
        if let Some(window) = web_sys::window() {
            if let Some(ref closure) = *closure_clone.borrow() {
                let id = window
                    .request_animation_frame(closure.as_ref().unchecked_ref())
                    .ok();
                *animation_frame_id_for_loop.borrow_mut() = id;
            }
        }
    }));

    if let Some(ref cb) = *closure.borrow() {
        let id = window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .ok();
        *animation_frame_id.borrow_mut() = id;
    }
}

fn viewport_from(window: &web_sys::Window) -> Viewport {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32;
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32;
    Viewport::new(width, height)
}

fn resize_canvas(canvas: &HtmlCanvasElement, viewport: Viewport) {
    canvas.set_width(viewport.width as u32);
    canvas.set_height(viewport.height as u32);
}
