//! Application state management.

use std::rc::Rc;
use yew::prelude::*;

/// UI state shared across the page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    /// Whether antigravity mode is active. This flag is the engine's
    /// entire control surface; everything else follows its edges.
    pub antigravity_active: bool,
}

/// Actions that can be dispatched to update the application state.
#[derive(Debug, Clone)]
pub enum AppAction {
    /// Flip antigravity mode on or off.
    ToggleAntigravity,
}

impl Reducible for AppState {
    type Action = AppAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            AppAction::ToggleAntigravity => Rc::new(Self {
                antigravity_active: !self.antigravity_active,
            }),
        }
    }
}

/// Context type for the application state.
pub type AppStateContext = UseReducerHandle<AppState>;

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_toggle_flips_the_flag() {
        let state = Rc::new(AppState::default());
        let state = state.reduce(AppAction::ToggleAntigravity);
        assert!(state.antigravity_active);
        let state = state.reduce(AppAction::ToggleAntigravity);
        assert!(!state.antigravity_active);
    }
}
