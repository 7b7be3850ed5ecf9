//! Floating toggle button for antigravity mode.

use yew::prelude::*;
use yew_icons::{Icon, IconId};

use crate::state::{AppAction, AppStateContext};

/// Fixed bottom-right button flipping the activation flag — the engine's
/// only control surface.
#[function_component(AntigravityToggle)]
pub fn antigravity_toggle() -> Html {
    let app_state = use_context::<AppStateContext>().expect("AppStateContext not found");
    let active = app_state.antigravity_active;

    let onclick = {
        let app_state = app_state.clone();
        Callback::from(move |_: MouseEvent| {
            app_state.dispatch(AppAction::ToggleAntigravity);
        })
    };

    html! {
        <button
            class={classes!("antigravity-toggle", active.then_some("active"))}
            onclick={onclick}
        >
            <Icon icon_id={IconId::LucideOrbit} width="20" height="20" />
            <span class="antigravity-toggle-label">
                { if active { "DISABLE" } else { "ANTIGRAVITY" } }
            </span>
        </button>
    }
}
