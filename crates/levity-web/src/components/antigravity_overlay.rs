//! Full-viewport overlay surface for the antigravity simulation.

use yew::prelude::*;

use crate::hooks::use_antigravity;
use crate::state::AppStateContext;

/// Overlay inline style: full viewport, transparent, and
/// pointer-transparent so clicks pass through to the page. The surface
/// sits just below the bound elements' elevated stacking order.
const OVERLAY_STYLE: &str = "position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
     z-index: 1000; pointer-events: none; background: transparent; opacity: 0;";

/// Render surface component. Present in the DOM only while the mode is
/// active; the lifecycle hook tracks the same flag and binds the page to
/// a fresh world on every enabling edge.
#[function_component(AntigravityOverlay)]
pub fn antigravity_overlay() -> Html {
    let app_state = use_context::<AppStateContext>().expect("AppStateContext not found");
    let active = app_state.antigravity_active;
    let canvas_ref = use_node_ref();

    let _antigravity = use_antigravity(active, canvas_ref.clone());

    if !active {
        return Html::default();
    }

    html! {
        <canvas
            ref={canvas_ref}
            class="antigravity-overlay"
            style={OVERLAY_STYLE}
        />
    }
}
