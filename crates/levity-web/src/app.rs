//! Main application component.

use yew::prelude::*;

use crate::components::{
    AntigravityOverlay, AntigravityToggle, Footer, Header, Hero, Services, Stats,
};
use crate::state::{AppState, AppStateContext};

#[function_component(App)]
pub fn app() -> Html {
    let app_state = use_reducer(AppState::default);

    html! {
        <ContextProvider<AppStateContext> context={app_state}>
            <div class="page">
                <Header />
                <main>
                    <Hero />
                    <Stats />
                    <Services />
                </main>
                <Footer />
            </div>
            <AntigravityOverlay />
            <AntigravityToggle />
        </ContextProvider<AppStateContext>>
    }
}
